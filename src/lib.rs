//! # Not-To-Do List 服务
//!
//! 个人"不做清单"：记录想要避免做的事情，每条带 1-5 优先级，
//! 支持列表、排序、编辑和删除。包括：
//! - REST API 服务端（/api/users、/api/tasks）
//! - 可互换的持久化后端：Postgres、Supabase、内存
//! - 消费端：API 客户端与应用状态（排序视图）

pub mod app;
pub mod client;
pub mod core;
pub mod infrastructure;

//! 单品展示页：数据、星级、排版与交互

pub mod handler;
pub mod model;
pub mod page;
pub mod rating;
pub mod service;

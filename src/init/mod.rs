// 启动阶段初始化
//! Boot-phase services that exist before any general memory manager.

pub mod alloc;

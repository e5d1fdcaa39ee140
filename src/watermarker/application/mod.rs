pub mod error;
pub mod input;
pub mod interactive;
pub mod watermark_service;

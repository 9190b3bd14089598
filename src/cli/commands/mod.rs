pub mod areas;
pub mod assign;
pub mod backup;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod detections;
pub mod export;
pub mod heatmap;
pub mod import;
pub mod init;
pub mod log;
pub mod staff;
pub mod stats;
pub mod work;

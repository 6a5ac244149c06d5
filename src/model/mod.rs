//! Bridge records as exchanged with the backend and shown by the console

pub mod admin;
pub mod audit;
pub mod s3;
pub mod user;

pub use admin::{Admin, AdminRow, CreateAdminPayload, UpdateAdminPayload, SYSTEM_ADMIN};
pub use audit::{
    AuthStatus, ClientSession, Counter, DailyStats, DailyStatsRecord, FileOperation, OperateStatus,
    OptType, TrafficPoint,
};
pub use s3::{S3Config, S3ConfigRow, S3NameOption, SelectOption};
pub use user::{BackendUser, CreateUserPayload, StorageType, UpdateUserPayload, User};

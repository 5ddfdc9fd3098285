pub mod backup;
pub mod directory;
pub mod log;
pub mod migration;
pub mod notice;
pub mod partition;
pub mod profile;
pub mod reminder;
pub mod visitors;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    CreateDir { path: PathBuf },
    MoveFile { from: PathBuf, to: PathBuf, twin: bool },
}

pub trait Reporter {
    fn planned(&mut self, action: &Action);
    fn completed(&mut self, action: &Action);
}

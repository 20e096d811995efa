pub use anyhow::{anyhow, bail, ensure, Context};
pub use log;
pub use ndarray::{array, Array1, ArrayView1};
pub use serde::{Deserialize, Serialize};
pub use std::ffi::OsStr;
pub use std::fs::File;
pub use std::path::{Path, PathBuf};

pub use crate::error::TyreError;
pub use crate::traits::*;

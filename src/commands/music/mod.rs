pub(crate) mod leave;
pub(crate) mod play;

pub(crate) mod utils;

use crate::{CommandResult, Context};

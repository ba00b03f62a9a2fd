//! # Policy Handlers
//!
//! One decision procedure per command. The recursive ones implement
//! [`Policy`](crate::traverse::Policy) and are driven by
//! [`Traversal::walk`]; `fetch` and `update` delegate recursion to git
//! itself and run a single command at the root.
//!
//! | Command    | Module      | Order                |
//! |------------|-------------|----------------------|
//! | `do`       | [`exec`]    | parent before child  |
//! | `headless` | [`headless`]| parent before child  |
//! | `pull`     | [`pull`]    | parent before child  |
//! | `push`     | [`push`]    | child before parent  |
//! | `status`   | [`report`]  | parent before child  |

pub mod exec;
pub mod headless;
pub mod pull;
pub mod push;
pub mod report;

pub use exec::RunEverywhere;
pub use headless::Headless;
pub use pull::Pull;
pub use push::Push;
pub use report::StatusReport;

use crate::error::Result;
use crate::traverse::Traversal;

const FETCH_COMMAND: &str = "git fetch --recurse-submodules=yes";
const UPDATE_COMMAND: &str = "git submodule update --init --recursive";

/// Fetch remote updates for the root and every submodule in one pass.
pub fn fetch(walk: &mut Traversal<'_>) -> Result<()> {
    walk.run_checked(FETCH_COMMAND)
}

/// Initialize every submodule and check it out at its recorded commit.
pub fn update(walk: &mut Traversal<'_>) -> Result<()> {
    walk.run_checked(UPDATE_COMMAND)
}

//! `status`: print which branch each repository follows.
//!
//! Output is one line per repository, parents first:
//!
//! ```text
//! . is on branch main
//! libs/foo is headless
//! libs/bar is not initialized
//! ```

use console::style;

use crate::error::Result;
use crate::status::Branch;
use crate::traverse::{Policy, RepositoryNode, Traversal};

#[derive(Debug, Default, Clone, Copy)]
pub struct StatusReport {
    use_color: bool,
}

impl StatusReport {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn paint(&self, text: &str, headless: bool) -> String {
        if !self.use_color {
            return text.to_string();
        }
        let styled = if headless {
            style(text).yellow()
        } else {
            style(text).green()
        };
        styled.force_styling(true).to_string()
    }
}

impl Policy for StatusReport {
    type Context = ();

    fn visit(&mut self, walk: &mut Traversal<'_>, node: &RepositoryNode, _: &()) -> Result<()> {
        match walk.current_branch()? {
            Branch::Named(name) => walk.report(format_args!(
                "{} is on branch {}",
                node.display_path(),
                self.paint(&name, false)
            )),
            Branch::Detached => walk.report(format_args!(
                "{} is {}",
                node.display_path(),
                self.paint("headless", true)
            )),
        }
    }

    fn descend(&mut self, walk: &mut Traversal<'_>, child: &RepositoryNode) -> Result<Option<()>> {
        if child.is_new {
            walk.report(format_args!("{} is not initialized", child.display_path()))?;
            return Ok(None);
        }
        Ok(Some(()))
    }
}

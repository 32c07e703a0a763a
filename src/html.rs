//! HTML rendering of a report through an external template.

use crate::report::Report;
use anyhow::{Context, Result};
use minijinja::{path_loader, Environment};
use std::path::Path;

/// Fixed name of the report template, looked up in the template directory.
pub const TEMPLATE_NAME: &str = "binpage.html";

/// Renders the report through [`TEMPLATE_NAME`] found in `template_dir`.
///
/// A missing or unparseable template is an error; the report itself always
/// renders once the template loads, since every field is already a plain
/// serializable value.
pub fn render_html(report: &Report, template_dir: &Path) -> Result<String> {
    let mut env = Environment::new();
    env.set_loader(path_loader(template_dir));

    let template = env.get_template(TEMPLATE_NAME).with_context(|| {
        format!(
            "failed to load template {TEMPLATE_NAME:?} from {}",
            template_dir.display()
        )
    })?;

    Ok(template.render(report)?)
}

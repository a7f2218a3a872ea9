//! Page templates, compiled once into a shared environment.

use minijinja::{Environment, Value};
use tracing::error;

use quill_core::{Error, Result};

/// Build the template environment with all pages registered.
///
/// Templates are embedded at compile time; a failure to register is a
/// programming error, caught by the template unit tests.
pub fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.add_template("layout", include_str!("../templates/layout.html"))
        .expect("layout template is valid");
    env.add_template("index", include_str!("../templates/index.html"))
        .expect("index template is valid");
    env.add_template("login", include_str!("../templates/login.html"))
        .expect("login template is valid");
    env.add_template("sign_up", include_str!("../templates/sign_up.html"))
        .expect("sign_up template is valid");
    env
}

/// Render a registered template with the given context.
pub fn render(env: &Environment<'static>, name: &str, ctx: Value) -> Result<String> {
    let template = env
        .get_template(name)
        .map_err(|e| Error::Render(e.to_string()))?;
    template.render(ctx).map_err(|e| {
        error!(
            subsystem = "web",
            component = "templates",
            template = name,
            error = %e,
            "Template rendering failed"
        );
        Error::Render(e.to_string())
    })
}

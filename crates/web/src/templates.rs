use minijinja::{default_auto_escape_callback, Environment, Value};

pub trait TemplateEngine: Send + Sync {
    fn render(&self, template_name: &str, context: Value) -> Result<String, minijinja::Error>;
}

/// Page templates compiled into the binary, keyed by the name used in
/// `{% extends %}` and [`TemplateEngine::render`].
const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("categories.html", include_str!("../templates/categories.html")),
    ("notes.html", include_str!("../templates/notes.html")),
    ("error.html", include_str!("../templates/error.html")),
];

pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    /// Build the engine, failing if any embedded template does not parse.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(default_auto_escape_callback);
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render(&self, template_name: &str, context: Value) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template_name)?;
        tmpl.render(context)
    }
}

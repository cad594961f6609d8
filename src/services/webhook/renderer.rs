//! Message Renderer
//!
//! Expands the bundled incoming-webhook template for a trigger. The template
//! set is compiled once per process and shared by every notifier.

use std::sync::{Arc, OnceLock};

use serde_json::{Map, Value};
use tera::{Context, Tera};

use mattermost_notifier_core::{NotifyError, NotifyResult, Trigger, MESSAGE_TEMPLATE};

use super::types::RenderModel;
use crate::config::PluginConfig;

const BUILT_IN_TEMPLATES: [(&str, &str); 1] = [(
    MESSAGE_TEMPLATE,
    include_str!("../../../templates/mattermost-incoming-message.json.tera"),
)];

/// Renders notification payloads from named templates.
pub struct MessageRenderer {
    tera: Tera,
}

impl MessageRenderer {
    /// Compile a renderer from `(name, source)` pairs.
    ///
    /// Syntax errors surface as `TemplateLoad`, since the template never
    /// becomes available under its name.
    pub fn from_templates<'a>(
        templates: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> NotifyResult<Self> {
        let mut tera = Tera::default();
        // Payloads are JSON; values are escaped with `json_encode` in the template.
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(templates)
            .map_err(|e| NotifyError::template_load(describe(&e)))?;
        Ok(Self { tera })
    }

    /// Renderer over the bundled templates, compiled on first use.
    pub fn shared() -> NotifyResult<Arc<MessageRenderer>> {
        static BUILT_IN: OnceLock<Result<Arc<MessageRenderer>, String>> = OnceLock::new();

        BUILT_IN
            .get_or_init(|| {
                MessageRenderer::from_templates(BUILT_IN_TEMPLATES)
                    .map(Arc::new)
                    .map_err(|e| e.to_string())
            })
            .clone()
            .map_err(NotifyError::TemplateLoad)
    }

    /// Render the payload for a trigger name supplied by the host.
    pub fn render(
        &self,
        trigger: &str,
        execution_data: &Map<String, Value>,
        config: &Map<String, Value>,
        plugin_config: &PluginConfig,
    ) -> NotifyResult<String> {
        let trigger: Trigger = trigger.parse()?;
        self.render_trigger(trigger, execution_data, config, plugin_config)
    }

    /// Render the payload for an already validated trigger.
    pub fn render_trigger(
        &self,
        trigger: Trigger,
        execution_data: &Map<String, Value>,
        config: &Map<String, Value>,
        plugin_config: &PluginConfig,
    ) -> NotifyResult<String> {
        let model = RenderModel::new(trigger, execution_data, config, plugin_config.icon_url());
        self.render_model(trigger.style().template, &model)
    }

    /// Expand a named template against a prepared model.
    pub fn render_model(&self, template: &str, model: &RenderModel<'_>) -> NotifyResult<String> {
        if !self.has_template(template) {
            return Err(NotifyError::template_load(format!(
                "Template '{}' not found",
                template
            )));
        }

        let context =
            Context::from_serialize(model).map_err(|e| NotifyError::template_render(describe(&e)))?;
        let payload = self
            .tera
            .render(template, &context)
            .map_err(|e| NotifyError::template_render(describe(&e)))?;

        tracing::debug!(
            "Rendered {} notification with template {} ({} bytes)",
            model.trigger,
            template,
            payload.len()
        );
        Ok(payload)
    }

    /// Whether a template is registered under `name`.
    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|registered| registered == name)
    }
}

impl std::fmt::Debug for MessageRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageRenderer")
            .field("templates", &self.tera.get_template_names().collect::<Vec<_>>())
            .finish()
    }
}

/// Tera reports the useful part (missing variable, parse position) in the
/// error's source chain rather than its top-level message.
fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

//! Status rendering with minijinja templates and console styles.

use console::Style;
use minijinja::{Environment, Value};
use serde::Serialize;

use themeswitch::{ColorMode, Indicator, ThemeController, ThemePreference};

use crate::output::OutputMode;

const STATUS_TEMPLATE: &str = r#"{{ "preference" | style("label") }}  {{ preference | style(preference) }}
{{ "device" | style("label") }}      {{ device | style(device) }}
{{ "effective" | style("label") }}   {{ effective | style(effective) }}
{{ "toggle" | style("label") }}      {{ indicator.icon }} {{ indicator.label | style("muted") }}"#;

const CHANGE_TEMPLATE: &str =
    r#"{{ "mode" | style("label") }} {{ from | style(from) }} -> {{ to | style(to) }}"#;

/// Snapshot of the controller for display.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub preference: ThemePreference,
    pub device: ColorMode,
    pub effective: ColorMode,
    pub indicator: Indicator,
}

impl StatusReport {
    pub fn capture(controller: &ThemeController) -> Self {
        Self {
            preference: controller.preference(),
            device: controller.device_scheme(),
            effective: controller.effective_mode(),
            indicator: controller.indicator(),
        }
    }
}

/// A rendered mode transition.
#[derive(Debug, Clone, Serialize)]
pub struct ModeChange {
    pub from: ColorMode,
    pub to: ColorMode,
}

fn style_for(name: &str) -> Option<Style> {
    let style = match name {
        "light" => Style::new().yellow(),
        "dark" => Style::new().blue().bold(),
        "system" => Style::new().cyan(),
        "label" => Style::new().bold(),
        "muted" => Style::new().dim(),
        _ => return None,
    };
    Some(style.force_styling(true))
}

fn register_filters(env: &mut Environment<'static>, use_color: bool) {
    env.add_filter("style", move |value: Value, name: String| -> String {
        let text = value.to_string();
        match style_for(&name) {
            Some(style) if use_color => style.apply_to(text).to_string(),
            _ => text,
        }
    });
}

/// Renders reports in the selected [`OutputMode`].
pub struct Renderer {
    env: Environment<'static>,
    mode: OutputMode,
}

impl Renderer {
    pub fn new(mode: OutputMode) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        register_filters(&mut env, mode.should_use_color());
        env.add_template("status", STATUS_TEMPLATE)?;
        env.add_template("change", CHANGE_TEMPLATE)?;
        Ok(Self { env, mode })
    }

    pub fn status(&self, report: &StatusReport) -> anyhow::Result<String> {
        self.render("status", report)
    }

    pub fn change(&self, change: &ModeChange) -> anyhow::Result<String> {
        self.render("change", change)
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> anyhow::Result<String> {
        if self.mode.is_structured() {
            return Ok(serde_json::to_string(data)?);
        }
        let template = self.env.get_template(name)?;
        Ok(template.render(data)?)
    }
}

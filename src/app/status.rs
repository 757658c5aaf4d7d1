use delaygate::Config;
use delaygate::panel::ControlView;

pub fn render_status(config: &Config, view: &ControlView) -> String {
    let mut lines = vec![
        "◆ delaygate".to_string(),
        String::new(),
        format!("Version:      {}", env!("CARGO_PKG_VERSION")),
        format!("Config:       {}", config.config_path.display()),
        format!("Upstream:     {}", config.upstream.base_url),
        format!("Cooldown:     {}s", config.cooldown.duration_secs),
        String::new(),
    ];
    lines.push(view.render_text());
    lines.join("\n")
}

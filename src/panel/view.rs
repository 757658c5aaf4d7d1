use crate::cooldown::LockWindow;
use crate::status::CanonicalStatus;
use serde::Serialize;

/// Everything the presentation layer needs for one render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlView {
    pub censored: bool,
    pub stream_running: bool,
    pub stream_state_label: Option<String>,
    pub censorship_state_label: Option<String>,
    pub fetch_error: Option<String>,
    pub locked: bool,
    pub seconds_remaining: u64,
    pub progress_percent: u8,
    pub destination_configured: bool,
    pub masked_secret: String,
    pub ingest_uri: Option<String>,
}

impl ControlView {
    pub fn assemble(
        status: CanonicalStatus,
        window: LockWindow,
        destination_configured: bool,
        masked_secret: String,
        ingest_uri: Option<String>,
    ) -> Self {
        Self {
            censored: status.censored,
            stream_running: status.stream_running,
            stream_state_label: status.stream_state_label,
            censorship_state_label: status.censorship_state_label,
            fetch_error: status.fetch_error,
            locked: window.locked,
            seconds_remaining: window.seconds_remaining,
            progress_percent: window.progress_percent,
            destination_configured,
            masked_secret,
            ingest_uri,
        }
    }

    /// Multi-line summary for the terminal.
    pub fn render_text(&self) -> String {
        let on_off = |flag: bool| if flag { "ON" } else { "OFF" };
        let mut lines = vec![
            format!(
                "Stream:       {}{}",
                if self.stream_running { "LIVE" } else { "OFFLINE" },
                label_suffix(self.stream_state_label.as_deref())
            ),
            format!(
                "Censorship:   {}{}",
                on_off(self.censored),
                label_suffix(self.censorship_state_label.as_deref())
            ),
        ];

        if self.locked {
            lines.push(format!(
                "Toggle lock:  LOCKED ({}s remaining, {}%)",
                self.seconds_remaining, self.progress_percent
            ));
        } else {
            lines.push("Toggle lock:  ready".to_string());
        }

        if self.destination_configured {
            lines.push(format!("Destination:  configured ({})", self.masked_secret));
        } else {
            lines.push("Destination:  not configured".to_string());
        }

        if let Some(uri) = &self.ingest_uri {
            lines.push(format!("Ingest:       {uri}"));
        }
        if let Some(error) = &self.fetch_error {
            lines.push(format!("Error:        {error}"));
        }
        lines.join("\n")
    }
}

fn label_suffix(label: Option<&str>) -> String {
    label.map(|l| format!(" [{l}]")).unwrap_or_default()
}

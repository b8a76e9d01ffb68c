use std::io::{self, BufRead, Write};

use tracing_subscriber::EnvFilter;

use tuitiond::import::{HttpSubmitter, NotificationQueue};
use tuitiond::{config, ipc};

fn init_tracing() {
    // stdout carries the IPC stream; logs go to stderr.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tuitiond=info")),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}

fn build_state(cfg: &config::SidecarConfig) -> anyhow::Result<ipc::AppState> {
    let submitter = HttpSubmitter::new(&cfg.api_base_url, cfg.request_timeout)?;
    let mut state = ipc::AppState {
        workspace: None,
        db: None,
        prefs: ipc::Preferences {
            username: None,
            language: cfg.language,
        },
        imports: ipc::ImportDialogs::default(),
        notifications: NotificationQueue::default(),
        submitter: Box::new(submitter),
    };
    if let Some(path) = cfg.workspace.as_deref() {
        ipc::open_workspace(&mut state, path)?;
    }
    Ok(state)
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cfg = config::SidecarConfig::from_env()?;
    tracing::info!(api = %cfg.api_base_url, language = cfg.language.as_str(), "tuitiond starting");
    let mut state = build_state(&cfg)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(error = %e, "stdin read failed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // Can't reply without id; answer with an id-less error line.
                tracing::warn!(error = %e, "malformed request");
                let _ = writeln!(
                    stdout,
                    "{}",
                    serde_json::json!({
                        "ok": false,
                        "error": { "code": "bad_json", "message": e.to_string() }
                    })
                );
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }

    tracing::info!("stdin closed, shutting down");
    Ok(())
}

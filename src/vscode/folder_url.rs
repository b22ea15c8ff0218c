//! Folder URI parsing for workspace.json
//!
//! The editor records the opened folder as a URI: `file:///...` for local
//! projects, `vscode-remote://<type>+<name>/...` for remote ones.

use percent_encoding::percent_decode_str;
use std::path::PathBuf;
use url::Url;

use crate::project::{RemoteInfo, RemoteType};

/// Parsed URL result containing path and optional remote info
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFolder {
    pub path: PathBuf,
    pub remote: Option<RemoteInfo>,
}

/// Convert a file:// or vscode-remote:// URL to a PathBuf with optional remote info
pub fn parse_folder_url(url_str: &str) -> Option<ParsedFolder> {
    let url = Url::parse(url_str).ok()?;

    match url.scheme() {
        "file" => {
            let path = url.to_file_path().ok()?;
            Some(ParsedFolder { path, remote: None })
        }
        "vscode-remote" => {
            // Dev containers on a remote host put the container part in the
            // username: dev-container+{config}@ssh-remote+host/path
            let username = percent_decode_str(url.username()).decode_utf8_lossy();
            let host = percent_decode_str(url.host_str()?).decode_utf8_lossy();

            let remote = if username.starts_with("dev-container+") {
                let name = host.split('+').nth(1).unwrap_or("container").to_string();
                Some(RemoteInfo {
                    remote_type: RemoteType::DevContainer,
                    name,
                })
            } else {
                host.split_once('+').map(|(kind, name)| RemoteInfo {
                    remote_type: RemoteType::parse(kind),
                    name: name.to_string(),
                })
            };

            let path = percent_decode_str(url.path()).decode_utf8_lossy();
            Some(ParsedFolder {
                path: PathBuf::from(path.as_ref()),
                remote,
            })
        }
        _ => None,
    }
}

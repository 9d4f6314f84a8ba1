// OS detection through the node's shell
#![allow(dead_code)]

use crate::executor::{CommandInvocation, Shell};
use crate::os::error::OsError;
use crate::os::types::{OsFamily, OsInfo, OsVersion};
use std::collections::HashMap;
use tracing::{debug, info};

/// Detect the OS of whatever the shell is connected to
pub async fn detect(shell: &Shell) -> Result<OsInfo, OsError> {
    let kernel = shell
        .run(
            &CommandInvocation::builder("uname")
                .arg("-s")
                .expect_exit(0)
                .failure_message("Failed to read kernel name")
                .build(),
        )
        .await?
        .stdout;
    let kernel = kernel.trim();
    debug!(kernel = %kernel, "detecting os");

    let info = if kernel == "Linux" {
        let os_release = shell
            .run(
                &CommandInvocation::builder("cat")
                    .arg("/etc/os-release")
                    .build(),
            )
            .await?;
        from_os_release(&os_release.stdout)
    } else if kernel.contains("BSD") {
        let release = shell
            .run(
                &CommandInvocation::builder("uname")
                    .arg("-r")
                    .expect_exit(0)
                    .failure_message("Failed to read kernel release")
                    .build(),
            )
            .await?;
        let family = if kernel == "FreeBSD" {
            OsFamily::FreeBsd
        } else {
            OsFamily::Bsd
        };
        OsInfo {
            family,
            version: release.stdout.parse().unwrap_or_default(),
            name: kernel.to_string(),
        }
    } else {
        OsInfo {
            family: OsFamily::Posix,
            version: OsVersion::default(),
            name: kernel.to_string(),
        }
    };

    info!(family = %info.family, version = %info.version, name = %info.name, "os detected");
    Ok(info)
}

/// Classify a Linux system from the contents of `/etc/os-release`
pub fn from_os_release(content: &str) -> OsInfo {
    let fields = parse_os_release(content);
    let id = fields.get("ID").map(String::as_str).unwrap_or_default();
    let id_like = fields.get("ID_LIKE").map(String::as_str).unwrap_or_default();

    let family = family_from_id(id).unwrap_or_else(|| {
        id_like
            .split_whitespace()
            .find_map(family_from_id)
            .unwrap_or(OsFamily::Linux)
    });

    OsInfo {
        family,
        version: fields
            .get("VERSION_ID")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default(),
        name: fields
            .get("PRETTY_NAME")
            .cloned()
            .unwrap_or_else(|| family.to_string()),
    }
}

fn family_from_id(id: &str) -> Option<OsFamily> {
    match id {
        "ubuntu" => Some(OsFamily::Ubuntu),
        "debian" => Some(OsFamily::Debian),
        "centos" => Some(OsFamily::CentOs),
        "fedora" => Some(OsFamily::Fedora),
        "rhel" | "redhat" | "almalinux" | "rocky" => Some(OsFamily::Redhat),
        "sles" | "suse" | "opensuse" | "opensuse-leap" => Some(OsFamily::Suse),
        _ => None,
    }
}

fn parse_os_release(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            (key.trim().to_string(), value.to_string())
        })
        .collect()
}

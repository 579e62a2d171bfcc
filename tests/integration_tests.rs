use httpmock::prelude::*;
use installer_card::adapters::http::ReleaseSelector;
use installer_card::domain::ports::SiteConfig;
use installer_card::utils::error::ErrorSeverity;
use installer_card::{
    CardEngine, CardError, CardPipeline, CliConfig, LocalStorage, ReleaseClient, TomlConfig,
};
use std::time::Duration;
use tempfile::TempDir;

fn cli_config(api_base: String, dest_dir: &str) -> CliConfig {
    CliConfig {
        org: "ManiVaultStudio".to_string(),
        repo: "Releases".to_string(),
        token: None,
        release_tag: None,
        dest_dir: dest_dir.to_string(),
        api_base,
        timeout_seconds: 5,
        config: None,
        dry_run: false,
        log_format: "compact".to_string(),
        verbose: false,
        site: SiteConfig::default(),
    }
}

fn ubuntu_release() -> serde_json::Value {
    serde_json::json!({
        "tag_name": "ManiVault-1.3.0-Ubuntu-24",
        "name": "ManiVault 1.3.0 (Ubuntu 24.04)",
        "published_at": "2025-06-02T14:05:09Z",
        "created_at": "2025-06-01T09:00:00Z",
        "assets": [
            {
                "name": "ManiVault-1.3.0-x86_64.AppImage",
                "size": 161480000,
                "browser_download_url": "https://github.com/ManiVaultStudio/Releases/releases/download/ManiVault-1.3.0-Ubuntu-24/ManiVault-1.3.0-x86_64.AppImage"
            },
            {
                "name": "checksums.txt",
                "size": 120,
                "browser_download_url": "https://example.com/checksums.txt"
            }
        ]
    })
}

#[tokio::test]
async fn test_end_to_end_latest_release() {
    let temp_dir = TempDir::new().unwrap();
    let dest_dir = temp_dir.path().join("_installers");
    let dest = dest_dir.to_str().unwrap();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/repos/ManiVaultStudio/Releases/releases/latest")
            .header("Accept", "application/vnd.github+json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(ubuntu_release());
    });

    let config = cli_config(server.base_url(), dest);
    let storage = LocalStorage::new(dest);
    let pipeline = CardPipeline::new(storage, config).unwrap();
    let engine = CardEngine::new(pipeline);

    let output_path = engine.run().await.unwrap();
    api_mock.assert();

    let expected_path = dest_dir.join("1.3.0_ubuntu_24.md");
    assert_eq!(output_path, expected_path.display().to_string());

    let content = std::fs::read_to_string(&expected_path).unwrap();
    let expected = "---
layout: plugin
name: \"Linux\"
shortname: \"Linux\"
compatibility: \"Ubuntu 22.04+\"
key: linux
type: installer
image: 
version: 1.3.0
date:   2025-06-02 14:05:09
order: 3
icon: linux
size: 154 MB

organization: ManiVault
organization-link: https://www.manivault.studio
download-link: https://github.com/ManiVaultStudio/Releases/releases/download/ManiVault-1.3.0-Ubuntu-24/ManiVault-1.3.0-x86_64.AppImage
---
1.3.0 release of ManiVault Studio.
";
    assert_eq!(content, expected);
}

#[tokio::test]
async fn test_end_to_end_tagged_release_with_token() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().to_str().unwrap();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/repos/ManiVaultStudio/Releases/releases/tags/ManiVault_1.3_online_Windows")
            .header("Authorization", "Bearer ghp_secret");
        then.status(200).json_body(serde_json::json!({
            "tag_name": "ManiVault_1.3_online_Windows",
            "published_at": "2025-05-20T07:45:00+02:00",
            "assets": [{
                "name": "ManiVault_1.3_online.exe",
                "size": 92274688,
                "browser_download_url": "https://example.com/ManiVault_1.3_online.exe"
            }]
        }));
    });

    let mut config = cli_config(server.base_url(), dest);
    config.token = Some("ghp_secret".to_string());
    config.release_tag = Some("ManiVault_1.3_online_Windows".to_string());

    let pipeline = CardPipeline::new(LocalStorage::new(dest), config).unwrap();
    let output_path = CardEngine::new(pipeline).run().await.unwrap();
    api_mock.assert();

    assert!(output_path.ends_with("1.3.0_windows.md"));
    let content = std::fs::read_to_string(&output_path).unwrap();
    assert!(content.contains("key: windows\n"));
    assert!(content.contains("order: 1\n"));
    assert!(content.contains("date:   2025-05-20 05:45:00\n"));
    assert!(content.contains("size: 88 MB\n"));
    assert!(content.contains("download-link: https://example.com/ManiVault_1.3_online.exe\n"));
}

#[tokio::test]
async fn test_release_without_assets_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let dest_dir = temp_dir.path().join("_installers");
    let dest = dest_dir.to_str().unwrap();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/repos/ManiVaultStudio/Releases/releases/latest");
        then.status(200).json_body(serde_json::json!({
            "tag_name": "ManiVault-1.3.0-Ubuntu-24",
            "published_at": "2025-06-02T14:05:09Z",
            "assets": []
        }));
    });

    let pipeline =
        CardPipeline::new(LocalStorage::new(dest), cli_config(server.base_url(), dest)).unwrap();
    let result = CardEngine::new(pipeline).run().await;
    api_mock.assert();

    let err = result.unwrap_err();
    assert!(matches!(err, CardError::NoAssets { .. }));
    assert_eq!(
        err.user_friendly_message(),
        "Release has no assets; cannot create installer card."
    );
    assert!(!dest_dir.exists());
}

#[tokio::test]
async fn test_http_error_is_propagated() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().to_str().unwrap();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/repos/ManiVaultStudio/Releases/releases/tags/does-not-exist");
        then.status(404)
            .json_body(serde_json::json!({"message": "Not Found"}));
    });

    let mut config = cli_config(server.base_url(), dest);
    config.release_tag = Some("does-not-exist".to_string());

    let pipeline = CardPipeline::new(LocalStorage::new(dest), config).unwrap();
    let err = CardEngine::new(pipeline).run().await.unwrap_err();
    api_mock.assert();

    assert!(matches!(err, CardError::ApiError(_)));
    assert_eq!(err.http_status(), Some(404));
    assert_eq!(std::fs::read_dir(dest).unwrap().count(), 0);
}

#[tokio::test]
async fn test_preview_does_not_touch_disk() {
    let temp_dir = TempDir::new().unwrap();
    let dest_dir = temp_dir.path().join("_installers");
    let dest = dest_dir.to_str().unwrap();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/repos/ManiVaultStudio/Releases/releases/latest");
        then.status(200).json_body(ubuntu_release());
    });

    let pipeline =
        CardPipeline::new(LocalStorage::new(dest), cli_config(server.base_url(), dest)).unwrap();
    let (file_name, markdown) = CardEngine::new(pipeline).preview().await.unwrap();
    api_mock.assert();

    assert_eq!(file_name, "1.3.0_ubuntu_24.md");
    assert!(markdown.starts_with("---\nlayout: plugin\n"));
    assert!(!dest_dir.exists());
}

#[tokio::test]
async fn test_end_to_end_with_toml_config() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let dest_dir = temp_dir.path().join("site").join("_downloads");

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/repos/acme/desktop/releases/tags/Acme-2.4-macOS");
        then.status(200).json_body(serde_json::json!({
            "tag_name": "Acme-2.4-macOS",
            "published_at": null,
            "created_at": "2025-04-11T18:20:00Z",
            "assets": [{
                "name": "Acme-2.4-universal.dmg",
                "size": 0,
                "browser_download_url": "https://downloads.acme.example.com/Acme-2.4-universal.dmg"
            }]
        }));
    });

    let toml_content = format!(
        r#"
[source]
org = "acme"
repo = "desktop"
api_base = "{}"
release_tag = "Acme-2.4-macOS"

[output]
dest_dir = "{}"

[site]
organization = "Acme"
organization_link = "https://acme.example.com"
product_name = "Acme Desktop"

[site.compatibility]
mac = "macOS 13+"
"#,
        server.base_url(),
        dest_dir.display().to_string().replace('\\', "/")
    );

    let config = TomlConfig::from_toml_str(&toml_content)?;
    let storage = LocalStorage::new(config.output.dest_dir.clone());
    let pipeline = CardPipeline::new(storage, config)?;
    let output_path = CardEngine::new(pipeline).run().await?;
    api_mock.assert();

    assert!(output_path.ends_with("2.4.0_macos.md"));
    let content = std::fs::read_to_string(dest_dir.join("2.4.0_macos.md"))?;
    assert!(content.contains("name: \"macOS\"\n"));
    assert!(content.contains("compatibility: \"macOS 13+\"\n"));
    assert!(content.contains("icon: apple\n"));
    assert!(content.contains("date:   2025-04-11 18:20:00\n"));
    assert!(content.contains("size: 0 MB\n"));
    assert!(content.contains("organization: Acme\n"));
    assert!(content.ends_with("2.4.0 release of Acme Desktop.\n"));
    Ok(())
}

#[tokio::test]
async fn test_non_json_body_is_a_data_error() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().to_str().unwrap();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/repos/ManiVaultStudio/Releases/releases/latest");
        then.status(200)
            .header("Content-Type", "text/html")
            .body("<html>not json</html>");
    });

    let pipeline =
        CardPipeline::new(LocalStorage::new(dest), cli_config(server.base_url(), dest)).unwrap();
    let err = CardEngine::new(pipeline).run().await.unwrap_err();
    api_mock.assert();

    assert!(matches!(err, CardError::SerializationError(_)));
    assert_eq!(err.severity(), ErrorSeverity::High);
    assert_eq!(err.http_status(), None);
    assert!(err
        .user_friendly_message()
        .starts_with("GitHub API answered, but not with a release"));
    assert_eq!(std::fs::read_dir(dest).unwrap().count(), 0);
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    for token in [None, Some("")] {
        let server = MockServer::start();
        let auth_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/repos/ManiVaultStudio/Releases/releases/latest")
                .header_exists("Authorization");
            then.status(200).json_body(ubuntu_release());
        });

        let client =
            ReleaseClient::new(&server.base_url(), token, Duration::from_secs(5)).unwrap();
        let result = client
            .fetch_release("ManiVaultStudio", "Releases", ReleaseSelector::Latest)
            .await;

        // 沒有 Authorization 時不會命中 mock，httpmock 回 404
        assert_eq!(auth_mock.hits(), 0, "token {:?}", token);
        assert_eq!(result.unwrap_err().http_status(), Some(404));
    }
}

//! Scan workflow runner
//!
//! Reads the image list, writes the audit file, authenticates once, runs the
//! scan with terminal progress, and renders the final report.

use crate::cli::args::Args;
use crate::config::{AppConfig, AuthConfig, RegistryConfig};
use crate::error::{CheckerError, Result};
use crate::image::{ImageReference, parse_image_list};
use crate::output::OutputManager;
use crate::registry::{AuthToken, Authenticator, RegistryChecker};
use crate::scan::{ScanReport, Scanner};
use std::io::Read;

pub struct Runner {
    args: Args,
    output: OutputManager,
}

impl Runner {
    pub fn new(args: Args) -> Result<Self> {
        // JSON reports go to stdout; keep the human chatter out of them
        let output = if args.quiet || args.output == "json" {
            OutputManager::new_quiet()
        } else {
            OutputManager::new(args.verbose)
        };

        Ok(Self { args, output })
    }

    pub fn output(&self) -> &OutputManager {
        &self.output
    }

    pub async fn run(&self) -> Result<ScanReport> {
        self.output.section("Docker Image Checker");

        self.args.validate().map_err(CheckerError::Config)?;
        let config = self.build_config()?;

        // Credentials are a startup requirement, checked before any input
        // is read or any request goes out
        let (username, password) = config.auth.resolved()?;

        let raw_input = self.read_input()?;
        let image_text = raw_input.trim();
        if image_text.is_empty() {
            return Err(CheckerError::Config(
                "No image references provided".to_string(),
            ));
        }

        if !self.args.no_save {
            self.save_image_list(image_text)?;
        }

        let references: Vec<ImageReference> = parse_image_list(image_text).collect();
        if references.is_empty() {
            return Err(CheckerError::Config(
                "No valid image references found. Check your input for comments and blank lines"
                    .to_string(),
            ));
        }
        self.output
            .info(&format!("Found {} image references", references.len()));

        let token = self.authenticate(&config, username, password).await?;

        let checker = RegistryChecker::new(&config.registry)?;
        let scanner = Scanner::new(checker);

        let output = &self.output;
        let report = scanner
            .scan(&token, &references, |completed, total| {
                output.scan_progress(completed, total);
            })
            .await;
        output.scan_progress_done();

        self.render_report(&report)?;
        Ok(report)
    }

    fn build_config(&self) -> Result<AppConfig> {
        let registry =
            RegistryConfig::new(&self.args.registry, self.args.skip_tls, self.args.timeout)?;
        let auth = AuthConfig::new(self.args.username.clone(), self.args.password.clone());
        Ok(AppConfig::new(registry, auth))
    }

    fn read_input(&self) -> Result<String> {
        match &self.args.file {
            Some(file) => {
                self.output.verbose(&format!("Reading image list from {}", file));
                Ok(std::fs::read_to_string(file)?)
            }
            None => {
                self.output.verbose("Reading image list from stdin");
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                Ok(text)
            }
        }
    }

    /// Write the raw (trimmed) image list before scanning. The file is an
    /// audit artifact; nothing reads it back.
    fn save_image_list(&self, image_text: &str) -> Result<()> {
        std::fs::write(&self.args.save_file, image_text)?;
        self.output
            .detail(&format!("Image list saved to {}", self.args.save_file));
        Ok(())
    }

    async fn authenticate(
        &self,
        config: &AppConfig,
        username: &str,
        password: &str,
    ) -> Result<AuthToken> {
        self.output.verbose(&format!(
            "Authenticating against {} as {}",
            config.registry.address, username
        ));

        let authenticator = Authenticator::new(&config.registry)?;
        let token = authenticator.login(username, password).await?;

        self.output.success("Authentication token obtained");
        self.output
            .detail(&format!("Token length: {} chars", token.as_str().len()));
        Ok(token)
    }

    fn render_report(&self, report: &ScanReport) -> Result<()> {
        if self.args.output == "json" {
            println!("{}", serde_json::to_string_pretty(report)?);
            return Ok(());
        }

        let present: Vec<String> = report.present.iter().map(|r| r.to_string()).collect();
        let not_present: Vec<String> = report.not_present.iter().map(|r| r.to_string()).collect();

        self.output.list("Images present", &present);
        self.output.list("Images not present", &not_present);

        if !report.unreachable.is_empty() {
            let unreachable: Vec<String> =
                report.unreachable.iter().map(|r| r.to_string()).collect();
            self.output.warning(&format!(
                "{} of the missing images could not be checked (registry unreachable): {}",
                unreachable.len(),
                unreachable.join(", ")
            ));
        }

        self.output.summary(
            "Scan Results",
            &[
                ("Checked", report.total().to_string()),
                ("Present", report.present.len().to_string()),
                ("Not present", report.not_present.len().to_string()),
                ("Elapsed", self.output.elapsed_time()),
            ],
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn quiet_args(file: &str, save_file: &str, registry: &str) -> Args {
        Args {
            file: Some(file.to_string()),
            registry: registry.to_string(),
            username: Some("user".to_string()),
            password: Some("pass".to_string()),
            save_file: save_file.to_string(),
            no_save: false,
            timeout: 5,
            skip_tls: false,
            output: "text".to_string(),
            verbose: false,
            quiet: true,
        }
    }

    fn write_image_list(dir: &TempDir, contents: &str) -> String {
        let path = dir.path().join("images.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path.to_string_lossy().to_string()
    }

    #[tokio::test]
    async fn test_run_end_to_end_partitions_and_saves_audit_file() {
        let mut server = mockito::Server::new_async().await;
        let _login = server
            .mock("POST", "/v2/users/login/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token": "jwt"}"#)
            .create_async()
            .await;
        let _present = server
            .mock("GET", "/v2/repositories/alpine/tags/latest/")
            .with_status(200)
            .create_async()
            .await;
        let _absent = server
            .mock("GET", "/v2/repositories/doesnotexistabc/tags/v1/")
            .with_status(404)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let input = write_image_list(&dir, "alpine:latest\n# comment\ndoesnotexistabc:v1\n\n");
        let save_file = dir.path().join("audit.txt").to_string_lossy().to_string();

        let runner = Runner::new(quiet_args(&input, &save_file, &server.url())).unwrap();
        let report = runner.run().await.unwrap();

        assert_eq!(report.present, vec![ImageReference::new("alpine", "latest")]);
        assert_eq!(
            report.not_present,
            vec![ImageReference::new("doesnotexistabc", "v1")]
        );
        assert!(!report.all_present());

        // Audit file carries the trimmed raw text, comments included
        let saved = std::fs::read_to_string(&save_file).unwrap();
        assert_eq!(saved, "alpine:latest\n# comment\ndoesnotexistabc:v1");
    }

    #[tokio::test]
    async fn test_run_aborts_before_checks_when_login_fails() {
        let mut server = mockito::Server::new_async().await;
        let _login = server
            .mock("POST", "/v2/users/login/")
            .with_status(401)
            .create_async()
            .await;
        let tag_mock = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .expect(0)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let input = write_image_list(&dir, "alpine:latest\n");
        let save_file = dir.path().join("audit.txt").to_string_lossy().to_string();

        let runner = Runner::new(quiet_args(&input, &save_file, &server.url())).unwrap();
        let result = runner.run().await;

        assert!(matches!(result, Err(CheckerError::Authentication(_))));
        tag_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_run_rejects_missing_credentials_before_reading_input() {
        let dir = TempDir::new().unwrap();
        let input = write_image_list(&dir, "alpine:latest\n");
        let save_file = dir.path().join("audit.txt").to_string_lossy().to_string();

        let mut args = quiet_args(&input, &save_file, "http://127.0.0.1:1");
        args.username = None;

        let runner = Runner::new(args).unwrap();
        let result = runner.run().await;
        assert!(matches!(result, Err(CheckerError::Config(_))));
    }

    #[tokio::test]
    async fn test_run_rejects_input_with_no_references() {
        let dir = TempDir::new().unwrap();
        let input = write_image_list(&dir, "# only comments\n\n");
        let save_file = dir.path().join("audit.txt").to_string_lossy().to_string();

        // Registry address points nowhere; the error must come from input
        // validation, not from the network
        let runner =
            Runner::new(quiet_args(&input, &save_file, "http://127.0.0.1:1")).unwrap();
        let result = runner.run().await;
        assert!(matches!(result, Err(CheckerError::Config(_))));
    }

    #[tokio::test]
    async fn test_run_skips_audit_file_with_no_save() {
        let mut server = mockito::Server::new_async().await;
        let _login = server
            .mock("POST", "/v2/users/login/")
            .with_status(200)
            .with_body(r#"{"token": "jwt"}"#)
            .create_async()
            .await;
        let _tags = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let input = write_image_list(&dir, "alpine:latest\n");
        let save_file = dir.path().join("audit.txt").to_string_lossy().to_string();

        let mut args = quiet_args(&input, &save_file, &server.url());
        args.no_save = true;

        let runner = Runner::new(args).unwrap();
        runner.run().await.unwrap();

        assert!(!std::path::Path::new(&save_file).exists());
    }
}

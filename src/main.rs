use docker_image_checker::cli::{Args, Runner};

#[tokio::main]
async fn main() {
    let args = Args::parse_args().from_env();

    let runner = match Runner::new(args) {
        Ok(runner) => runner,
        Err(e) => {
            eprintln!("❌ ERROR: {}", e);
            std::process::exit(2);
        }
    };

    match runner.run().await {
        Ok(report) if report.all_present() => {}
        // Missing images are a reportable outcome, not an error, but scripts
        // still want to see it in the exit code
        Ok(_) => std::process::exit(1),
        Err(e) => {
            runner.output().error(&e.to_string());
            std::process::exit(2);
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(error) = annotate::cli::run(std::env::args_os()).await {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

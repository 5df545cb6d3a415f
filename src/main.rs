use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Optional first argument picks the starting page, e.g. `genai /chat`.
    let start = std::env::args().nth(1).unwrap_or_else(|| "/".to_string());
    genai_client::run(&start).await
}

use mentor_assessment::server;

#[tokio::main]
async fn main() {
    if let Err(err) = server::run().await {
        eprintln!("mentor-assessment failed: {err}");
        std::process::exit(1);
    }
}

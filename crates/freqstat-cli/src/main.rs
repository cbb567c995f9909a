use env_logger::Env;

mod chart;
mod command;
mod input;
mod render;
mod util;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    command::run()
}

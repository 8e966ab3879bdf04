use std::process;
use wdr::{
    cli::{self, Command, USAGE},
    config::{self, Config},
};

fn main() {
    config::load_dotenv();
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("{:#}", err);
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args = match Command::parse(std::env::args().skip(1))? {
        Command::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        Command::Run(args) => args,
    };

    let config = Config::from_env()?;
    log::debug!("{:?}", config);

    let stdout = std::io::stdout();
    cli::run(&args, &config, stdout.lock())
}

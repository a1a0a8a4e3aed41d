fn main() -> anyhow::Result<()> {
    env_logger::init();
    seqstats::cli::run::entry()
}

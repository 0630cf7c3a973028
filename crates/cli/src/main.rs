fn main() -> anyhow::Result<()> {
    rosetta_cli::run()
}

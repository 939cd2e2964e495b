use anyhow::Result;

fn main() -> Result<()> {
    answer_cli::main_entry()
}

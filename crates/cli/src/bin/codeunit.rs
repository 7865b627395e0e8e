use anyhow::Result;

fn main() -> Result<()> {
    codeunit_cli::main_entry()
}

// Coffee Catalog entry point

fn main() -> std::process::ExitCode {
    coffee_catalog_lib::run()
}

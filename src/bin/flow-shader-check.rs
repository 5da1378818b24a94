//! Builds a vertex/fragment WGSL pair offline and reports the result.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use flow_scaffold::pipelines::{build_program, naga_backend::NagaBackend};

#[derive(Parser)]
#[command(name = "flow-shader-check", about = "Compile and link a WGSL shader pair without a GPU")]
struct Cli {
    /// Vertex stage source
    vertex: PathBuf,
    /// Fragment stage source
    fragment: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    flow_scaffold::init_logger();

    let mut backend = NagaBackend::new();
    let program = build_program(&mut backend, &cli.vertex, &cli.fragment).with_context(|| {
        format!(
            "building program from {} and {}",
            cli.vertex.display(),
            cli.fragment.display()
        )
    })?;
    let linked = program.handle();
    println!(
        "Shader program loaded: {} (vs: {}, fs: {}, varyings: {:?})",
        program.label(),
        linked.vertex_entry_point,
        linked.fragment_entry_point,
        linked.varyings
    );
    Ok(())
}

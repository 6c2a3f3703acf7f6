use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use zeroinit::clang::{ClangCompiler, Node};
use zeroinit::config;
use zeroinit::rewrite::{
    DeclWalker, ExcludePolicy, RewriteBuffers, SourceMap, TouchedFiles, materialize,
};

#[derive(Parser, Debug)]
#[command(name = "zeroinit", version, about)]
struct Args {
    #[arg(long, short)]
    verbose: bool,

    #[arg(long)]
    log_file: Option<String>,

    /// Flags forwarded verbatim to clang, followed by the input file.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    compile_args: Vec<String>,
}

fn init_logging(args: &Args) {
    let stderr_filter = if args.verbose {
        EnvFilter::new("zeroinit=debug")
    } else {
        EnvFilter::new("zeroinit=info")
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_filter(stderr_filter);

    let registry = tracing_subscriber::registry().with(stderr_layer);

    if let Some(log_file) = &args.log_file {
        let log_path = PathBuf::from(log_file);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("zeroinit.log")),
        );
        let file_filter = if args.verbose {
            EnvFilter::new("zeroinit=debug")
        } else {
            EnvFilter::new("zeroinit=info")
        };
        let file_layer = fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .with_target(false)
            .with_filter(file_filter);
        registry.with(file_layer).init();
    } else {
        registry.init();
    }
}

fn main() {
    let args = Args::parse();

    let Some((input, clang_flags)) = args.compile_args.split_last() else {
        eprintln!("Usage: zeroinit <options> <filename>");
        std::process::exit(1);
    };

    init_logging(&args);

    // Make sure the input exists before standing anything up.
    if let Err(e) = std::fs::metadata(input) {
        error!("{input}: {e}");
        std::process::exit(1);
    }

    let input_path = Path::new(input);
    let cfg = config::resolve_config(input_path);

    let mut compiler = ClangCompiler::new(cfg.compiler.clang.clone());
    compiler.add_flags(cfg.compiler.flags.iter().cloned());
    compiler.add_include_paths(cfg.compiler.include_paths.iter().map(PathBuf::from));
    compiler.discover_system_includes();

    let Some(json) = compiler.ast_dump(input_path, clang_flags) else {
        error!("clang produced no usable AST for {input}");
        std::process::exit(1);
    };

    let root: Node = match serde_json::from_str(&json) {
        Ok(root) => root,
        Err(e) => {
            error!("failed to deserialize the clang AST: {e}");
            std::process::exit(1);
        }
    };

    let policy = ExcludePolicy::new(
        compiler.system_include_paths().to_vec(),
        &cfg.rewrite.exclude_prefixes,
    );
    let mut sources = SourceMap::new();
    let mut buffers = RewriteBuffers::new();
    let mut touched = TouchedFiles::new();

    DeclWalker::new(&mut sources, &mut buffers, &mut touched, &policy).walk(&root);

    let written = materialize(&touched, &buffers, &sources, &policy);
    info!("{written} of {} touched file(s) written", touched.len());

    // Per-file materialization failures were already reported; they do not
    // change the exit status.
}

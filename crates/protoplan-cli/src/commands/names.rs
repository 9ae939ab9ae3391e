use std::fmt::Write as _;
use std::path::PathBuf;

use protoplan_bytecode::{decode_names, dump_names, to_literal};
use protoplan_compiler::{CompileError, Compiler, CompilerConfig, DescriptorPool};
use protoplan_core::Colors;

use super::loader::{LoadError, load_schema};

pub struct NamesArgs {
    pub descriptor_set: PathBuf,
    pub type_name: Option<String>,
    pub defaults: Option<PathBuf>,
    pub literal: bool,
    pub color: bool,
}

pub fn run(args: NamesArgs) {
    let schema = match load_schema(&args.descriptor_set, args.defaults.as_deref()) {
        Ok(schema) => schema,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let colors = Colors::new(args.color);
    match render_names(
        &schema.pool,
        schema.config,
        args.type_name.as_deref(),
        args.literal,
        colors,
    ) {
        Ok(out) => print!("{}", out),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Name tables of every message then every enum, or only of `only`.
pub fn render_names(
    pool: &DescriptorPool,
    config: CompilerConfig,
    only: Option<&str>,
    literal: bool,
    colors: Colors,
) -> Result<String, LoadError> {
    let (messages, enums): (Vec<_>, Vec<_>) = match only {
        Some(name) => match (pool.find_message(name), pool.find_enum(name)) {
            (Some(message), _) => (vec![message], vec![]),
            (None, Some(enum_id)) => (vec![], vec![enum_id]),
            (None, None) => return Err(LoadError::UnknownType(name.to_string())),
        },
        None => (pool.messages().collect(), pool.enums().collect()),
    };

    let mut compiler = Compiler::new(pool, config);
    let mut sections = Vec::new();
    for id in messages {
        let compiled = compiler.compile_message(id)?;
        sections.push(("message", compiled.full_name.clone(), compiled.name_program.clone()));
    }
    for id in enums {
        let compiled = compiler.compile_enum(id);
        sections.push(("enum", compiled.full_name, compiled.name_program));
    }

    let c = &colors;
    let mut out = String::new();
    for (i, (kind, full_name, program)) in sections.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let entries = decode_names(program).map_err(CompileError::from)?;
        writeln!(out, "{}{} {}{}", c.blue, kind, full_name, c.reset).unwrap();
        out.push_str(&dump_names(&entries, colors));
        if literal {
            writeln!(out, "literal {}", to_literal(program)).unwrap();
        }
    }
    Ok(out)
}

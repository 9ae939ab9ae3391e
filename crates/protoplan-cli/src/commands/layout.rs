use std::fmt::Write as _;
use std::path::PathBuf;

use protoplan_bytecode::{decode_layout, dump_layout, to_literal};
use protoplan_compiler::{
    CompileError, CompiledMessage, Compiler, CompilerConfig, DescriptorPool, MessageId,
};
use protoplan_core::Colors;

use super::loader::{LoadError, load_schema};

pub struct LayoutArgs {
    pub descriptor_set: PathBuf,
    pub message: Option<String>,
    pub defaults: Option<PathBuf>,
    pub literal: bool,
    pub color: bool,
}

pub fn run(args: LayoutArgs) {
    let schema = match load_schema(&args.descriptor_set, args.defaults.as_deref()) {
        Ok(schema) => schema,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let colors = Colors::new(args.color);
    match render_layouts(
        &schema.pool,
        schema.config,
        args.message.as_deref(),
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

/// Layout listing of every message, or only of `only`.
pub fn render_layouts(
    pool: &DescriptorPool,
    config: CompilerConfig,
    only: Option<&str>,
    literal: bool,
    colors: Colors,
) -> Result<String, LoadError> {
    let messages: Vec<MessageId> = match only {
        Some(name) => vec![
            pool.find_message(name)
                .ok_or_else(|| LoadError::UnknownType(name.to_string()))?,
        ],
        None => pool.messages().collect(),
    };

    let mut compiler = Compiler::new(pool, config);
    let mut out = String::new();
    for (i, id) in messages.into_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let compiled = compiler.compile_message(id)?;
        write_message(&mut out, &compiled, literal, colors)?;
    }
    Ok(out)
}

fn write_message(
    out: &mut String,
    compiled: &CompiledMessage,
    literal: bool,
    colors: Colors,
) -> Result<(), LoadError> {
    let c = &colors;
    let storage = if compiled.storage.uses_storage {
        "out-of-line".to_string()
    } else {
        format!("inline, cost {}", compiled.storage.cost_as_field)
    };
    writeln!(
        out,
        "{}message {}{}  {}",
        c.blue,
        compiled.full_name,
        c.reset,
        c.dimmed(&format!("({storage})"))
    )
    .unwrap();

    for (target, program) in &compiled.layout_programs {
        let plan = decode_layout(program).map_err(CompileError::from)?;
        writeln!(out).unwrap();
        writeln!(out, "{}; {}{}", c.dim, target, c.reset).unwrap();
        out.push_str(&dump_layout(&plan, colors));
        if literal {
            writeln!(out, "literal {}", to_literal(program)).unwrap();
        }
    }

    if !compiled.layout.submessages.is_empty() {
        writeln!(out).unwrap();
        writeln!(out, "{}[submessages]{}", c.blue, c.reset).unwrap();
        for sub in &compiled.layout.submessages {
            let check = if sub.needs_is_initialized_check {
                "check"
            } else {
                "skip"
            };
            writeln!(
                out,
                "M{}  {}{}{}  {}",
                sub.index,
                c.green,
                sub.type_name,
                c.reset,
                c.dimmed(check)
            )
            .unwrap();
        }
    }
    Ok(())
}

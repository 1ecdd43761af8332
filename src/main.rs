// c2py: C-to-Python source translator

mod codegen;
mod parser;
mod semantic;

use std::fs;
use std::path::Path;

use codegen::generator::CodeGenerator;
use parser::lexer::Lexer;
use parser::parser::Parser;
use semantic::analyzer::SemanticAnalyzer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.get(0).map(|s| s.as_str()).unwrap_or("c2py");

    let mut input: Option<&str> = None;
    let mut output: Option<&str> = None;
    let mut dump_tokens = false;
    let mut dump_ast = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-o" => {
                i += 1;
                match args.get(i) {
                    Some(path) => output = Some(path.as_str()),
                    None => {
                        eprintln!("Error: '-o' expects an output file name");
                        std::process::exit(1);
                    }
                }
            }
            "--tokens" => dump_tokens = true,
            "--ast" => dump_ast = true,
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option '{}'", arg);
                std::process::exit(1);
            }
            arg => {
                if input.is_some() {
                    eprintln!("Error: More than one input file provided");
                    std::process::exit(1);
                }
                input = Some(arg);
            }
        }
        i += 1;
    }

    let input = match input {
        Some(input) => input,
        None => {
            eprintln!("Error: No input file provided");
            eprintln!();
            eprintln!(
                "Usage: {} <file.c> [-o <file.py>] [--tokens] [--ast]",
                program_name
            );
            eprintln!();
            eprintln!("Options:");
            eprintln!("  -o <file.py>   write generated Python to a file instead of stdout");
            eprintln!("  --tokens       dump the token stream to stderr");
            eprintln!("  --ast          dump the syntax tree to stderr");
            std::process::exit(1);
        }
    };

    if !Path::new(input).exists() {
        eprintln!("Error: File '{}' not found", input);
        std::process::exit(1);
    }

    // Read source code
    let source = fs::read_to_string(input)?;

    if dump_tokens {
        let mut lexer = Lexer::new(&source);
        match lexer.tokenize() {
            Ok(tokens) => {
                for token in &tokens {
                    eprintln!(
                        "{:>4}:{:<4} {}",
                        token.location.line, token.location.column, token
                    );
                }
            }
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
    }

    // Parse the source code
    eprintln!("Parsing {}...", input);
    let parser = match Parser::new(&source) {
        Ok(parser) => parser,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let program = match parser.parse_program() {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    eprintln!(
        "Parsed successfully. Found {} function(s).",
        program.functions().len()
    );

    if dump_ast {
        eprint!("{}", program.dump());
    }

    // Type-check; errors block generation, warnings do not
    let mut analyzer = SemanticAnalyzer::new();
    let ok = analyzer.analyze(&program);

    for error in analyzer.errors() {
        eprintln!("{}", error);
    }
    for warning in analyzer.warnings() {
        eprintln!("{}", warning);
    }

    if !ok {
        eprintln!(
            "Found {} semantic error(s); no output written.",
            analyzer.errors().len()
        );
        std::process::exit(1);
    }

    // Generate Python
    eprintln!("Generating Python...");
    let mut generator = CodeGenerator::with_annotations(analyzer.annotations());
    let python = generator.generate(&program);

    match output {
        Some(path) => {
            fs::write(path, &python)?;
            eprintln!("Wrote {}.", path);
        }
        None => print!("{}", python),
    }

    Ok(())
}

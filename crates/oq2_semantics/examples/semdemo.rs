// Copyright contributors to the openqasm2-semantics project
// SPDX-License-Identifier: Apache-2.0

use clap::{Parser, Subcommand};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use oq2_lexer::{tokenize, Token};
use oq2_semantics::asg::Program;
use oq2_semantics::context::{BuildOptions, SharedRegisterNames};
use oq2_semantics::syntax_to_semantics;
use oq2_semantics::validate;
use oq2_source_file::SourceTrait;

#[derive(Parser)]
#[command(name = "semdemo")]
#[command(about = "Demo of parser that parses and prints tokens, trees or programs to stdout.")]
#[command(long_about = "
Demo of parser that parses and prints tokens, trees or programs to stdout.

Commands are `lex`, `parse`, `semantic`, `semantic-string`, `semantic-pretty`.
`lex` prints a stream of tokens. `parse` prints the syntax tree.
`semantic` prints the program with all register references resolved, followed by
the findings of the checks in `validate`.
")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Allow a quantum and a classical register to have the same name
    #[arg(long, global = true)]
    shared_register_names: bool,
}

// `value_name` expects bare word, not flag.
#[derive(Subcommand)]
enum Commands {
    /// Parse file to a program
    Semantic {
        #[arg(value_name = "FILENAME")]
        /// file name to read
        file_name: PathBuf,
    },

    /// Same as `semantic`, but test the parse_source_string interface
    SemanticString {
        #[arg(value_name = "FILENAME")]
        /// file name to read
        file_name: PathBuf,
    },

    /// Same as `semantic`, but pretty-print the program
    SemanticPretty {
        #[arg(value_name = "FILENAME")]
        /// file name to read
        file_name: PathBuf,
    },

    /// Parse file to the syntax tree
    Parse {
        #[arg(value_name = "FILENAME")]
        /// file name to read
        file_name: PathBuf,
    },

    /// Lex file to `Token`s
    Lex {
        #[arg(value_name = "FILENAME")]
        file_name: PathBuf,
    },
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let options = BuildOptions::new()
        .with_shared_register_names(SharedRegisterNames::from(cli.shared_register_names));

    match &cli.command {
        Some(Commands::SemanticString { file_name }) => {
            let source = fs::read_to_string(file_name)?;
            let file_name = Some("giraffe");
            let result = syntax_to_semantics::parse_source_string(source, file_name, &options);
            if result.any_errors() {
                result.print_errors()?;
            }
            if let Some(program) = result.program() {
                program.print_asg_debug();
            }
        }

        Some(Commands::Semantic { file_name }) => {
            let result = syntax_to_semantics::parse_source_file(file_name, &options)?;
            let have_errors = result.any_errors();
            if have_errors {
                println!("Found errors: {}", have_errors);
                result.print_errors()?;
            }
            if let Some(program) = result.program() {
                program.print_asg_debug();
                print_findings(program);
            }
        }

        Some(Commands::SemanticPretty { file_name }) => {
            let result = syntax_to_semantics::parse_source_file(file_name, &options)?;
            println!("Found errors: {}", result.any_errors());
            result.print_errors()?;
            if let Some(program) = result.program() {
                program.print_asg_debug_pretty();
            }
        }

        Some(Commands::Parse { file_name }) => {
            let parsed_source = oq2_source_file::parse_source_file(file_name)?;
            let parse_tree = parsed_source.syntax_ast().tree();
            println!("Found {} statements", parse_tree.statements().count());
            let syntax_errors = parsed_source.syntax_ast().errors();
            println!(
                "Found {} parse errors:\n{:?}\n",
                syntax_errors.len(),
                syntax_errors
            );
            println!("{:#?}", parse_tree);
        }

        Some(Commands::Lex { file_name }) => {
            let tokens: Vec<Token> = tokenize(&read_example_source(file_name)?).collect();
            for tok in tokens {
                println!("{:?}", tok);
            }
        }

        None => {
            println!("Commands are semantic, semantic-string, semantic-pretty, parse, and lex")
        }
    }
    Ok(())
}

fn read_example_source(file_path: &Path) -> io::Result<String> {
    fs::read_to_string(file_path)
}

fn print_findings(program: &Program) {
    for name in validate::undefined_gate_calls(program) {
        println!("call of undefined gate '{name}'");
    }
    for measure in validate::measure_width_mismatches(program) {
        println!(
            "measure of {} qubits into {} bits",
            measure.qubits().width(),
            measure.cbits().width()
        );
    }
}

use callsite_patch::jvm::class_file::ClassFile;
use callsite_patch::jvm::code::Instructions;
use callsite_patch::jvm::{self, BinaryName, Name, UnqualifiedName};
use callsite_patch::patch::{
    self, ClassPathDirectory, ClassRepository, PatchOutcome, PatchRequest, RepositoryError,
    SnippetTemplate, WeaveError, Weaver,
};

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::process;

#[derive(Debug)]
enum Error {
    BadRequest(jvm::Error),
    ClassUnavailable(RepositoryError),
}

impl From<jvm::Error> for Error {
    fn from(err: jvm::Error) -> Error {
        Error::BadRequest(err)
    }
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Error {
        Error::ClassUnavailable(err)
    }
}

/// Weaver that just reports where the snippet would go
struct PrintingWeaver;

impl Weaver for PrintingWeaver {
    fn insert_at(
        &mut self,
        class: &BinaryName,
        method: &UnqualifiedName,
        line: u16,
        snippet: &str,
    ) -> Result<(), WeaveError> {
        println!("{}.{}:{}: {}", class, method, line, snippet);
        Ok(())
    }
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let preset = PatchRequest::skill_gain_information()?;
    let matches = Command::new("Call site patcher")
        .version("0.1.0")
        .author("Alec Theriault <alec.theriault@gmail.com>")
        .about("Find the line just after a static call, for inserting instrumentation there")
        .arg(
            Arg::new("CLASSPATH")
                .help("Directory containing the class files (eg. an unpacked JAR)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("class")
                .long("class")
                .value_name("CLASS_NAME")
                .default_value("com.wurmonline.server.skills.Skill")
                .help("Class containing the method to instrument (eg. `foo.bar.Baz`)"),
        )
        .arg(
            Arg::new("method")
                .long("method")
                .default_value("checkAdvance")
                .help("Method to instrument"),
        )
        .arg(
            Arg::new("owner")
                .long("owner")
                .value_name("CLASS_NAME")
                .default_value("com.wurmonline.server.skills.Skill")
                .help("Class declaring the static method being called"),
        )
        .arg(
            Arg::new("name")
                .long("name")
                .default_value("rollGaussian")
                .help("Name of the static method being called"),
        )
        .arg(
            Arg::new("descriptor")
                .long("descriptor")
                .default_value("(FFJLjava/lang/String;)F")
                .help("JVM descriptor of the static method being called"),
        )
        .arg(
            Arg::new("entry-point")
                .long("entry-point")
                .help("Method called by the inserted snippet (defaults to the skill report)"),
        )
        .arg(
            Arg::new("arg")
                .long("arg")
                .action(ArgAction::Append)
                .requires("entry-point")
                .help("Argument passed to the entry point (repeatable)"),
        )
        .arg(
            Arg::new("dump")
                .long("dump")
                .action(ArgAction::SetTrue)
                .help("List the instructions and line numbers of the method instead of patching"),
        )
        .get_matches();

    let snippet = match matches.get_one::<String>("entry-point") {
        Some(entry_point) => {
            let arguments: Vec<&str> = matches
                .get_many::<String>("arg")
                .map(|args| args.map(String::as_str).collect())
                .unwrap_or_default();
            SnippetTemplate::new(entry_point.as_str(), &arguments)
        }
        None => preset.snippet,
    };
    let request = PatchRequest::new(
        value_of(&matches, "class"),
        value_of(&matches, "method"),
        value_of(&matches, "owner"),
        value_of(&matches, "name"),
        value_of(&matches, "descriptor"),
        snippet,
    )?;
    let repository = ClassPathDirectory::new(value_of(&matches, "CLASSPATH"));

    if matches.get_flag("dump") {
        let class = repository.load(&request.target_class)?;
        return dump_method(&class, &request.target_method);
    }

    match patch::patch(&repository, &mut PrintingWeaver, &request) {
        PatchOutcome::Patched { .. } => Ok(()),
        PatchOutcome::Skipped(reason) => {
            eprintln!("Not patched: {}", reason);
            process::exit(1)
        }
    }
}

/// Value of an argument that is required or has a default
fn value_of<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .unwrap_or_default()
}

/// Print one line per instruction, prefixed with the source line where a new one starts
fn dump_method(class: &ClassFile, method_name: &UnqualifiedName) -> Result<(), Error> {
    let method = match class.method(method_name.as_str()) {
        Some(method) => method,
        None => {
            eprintln!("No method named {}", method_name);
            process::exit(1)
        }
    };
    let code = match method.code(&class.constants)? {
        Some(code) => code,
        None => {
            eprintln!("{} has no code", method_name);
            process::exit(1)
        }
    };
    let lines = code.line_numbers(&class.constants)?;

    let instructions = match Instructions::new(&code.code_array.0) {
        Ok(instructions) => instructions,
        Err(err) => {
            eprintln!("Cannot list instructions: {:?}", err);
            process::exit(1)
        }
    };
    for instruction in instructions {
        match instruction {
            Ok((offset, bytes)) => {
                let starts_line = lines.entries().iter().find(|e| e.start_pc == offset);
                match starts_line {
                    Some(entry) => print!("{:>6} ", entry.line_number),
                    None => print!("{:>6} ", ""),
                }
                println!("{:>5}: {:02x?}", offset, bytes);
            }
            Err(err) => {
                log::error!("Stopped listing: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}

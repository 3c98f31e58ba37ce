use std::{
    env,
    fs::{self, create_dir, read_to_string},
    path::PathBuf,
    time::Instant,
};

use minipar::{
    backend::{arm, c},
    display_error,
    ir::{generator::generate, tac::render},
    lexer::lexer::tokenize,
    parser::parser::parse,
    semantic::analyze,
};

fn main() {
    if !PathBuf::from("build").exists() {
        create_dir("build").unwrap();
    } else {
        for entry in fs::read_dir("build").unwrap() {
            let entry = entry.unwrap();
            let path = entry.path();
            fs::remove_file(path).unwrap();
        }
    }

    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        panic!("Incorrect arguments provided!");
    }

    let file_path: &str = &args[1];
    let file_name = if file_path.contains("/") {
        file_path.split("/").last().unwrap()
    } else {
        file_path
    };

    let start = Instant::now();

    let file_contents = read_to_string(file_path).expect("Failed to read file!");

    let tokens = tokenize(file_contents, Some(String::from(file_name)));

    if tokens.is_err() {
        display_error(tokens.err().unwrap(), PathBuf::from(file_path));
        panic!()
    }

    println!("Tokenized in {:?}", start.elapsed());

    let parse_start = Instant::now();
    let parsed_ast = parse(tokens.unwrap());

    println!("Parsed in {:?}", parse_start.elapsed());

    if parsed_ast.1.is_err() {
        display_error(parsed_ast.1.err().unwrap(), PathBuf::from(file_path));
        panic!()
    }

    let ast = parsed_ast.1.unwrap();

    let analyze_start = Instant::now();
    let analysis = analyze(&ast);

    println!("Analyzed in {:?}", analyze_start.elapsed());

    for warning in &analysis.warnings {
        println!("Warning: {}", warning);
    }

    if !analysis.ok {
        for diagnostic in &analysis.diagnostics {
            println!("{}", diagnostic);
        }
        panic!()
    }

    let generate_start = Instant::now();
    let code = generate(&ast);

    fs::write("build/out.tac", render(&code)).expect("Failed to write TAC output!");
    println!("Generated TAC in {:?}", generate_start.elapsed());

    let c_start = Instant::now();
    fs::write("build/out.c", c::generate(&code)).expect("Failed to write C output!");
    println!("Generated C in {:?}", c_start.elapsed());

    let arm_start = Instant::now();
    fs::write("build/out.s", arm::generate(&code)).expect("Failed to write ARM output!");
    println!("Generated ARM in {:?}", arm_start.elapsed());

    println!("Total time: {:?}", start.elapsed());
}

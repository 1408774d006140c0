use logbook_generator::{
    build_coursework_context, build_logbook_context, load_config, read_input_directory,
    CommentGrammar, MarkdownRenderer, Renderer, ScanResult, TaskKind,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CONFIG: &str = "module:
    code: CS1010
    name: Programming in C++
    semester: Autumn
    year: 2024
statement:
    text: I confirm this is my own work.
student:
    id: 12345678
    name: Ada Lovelace
university:
    department: Computer Science
    name: Example University
    start: 2024-09-23
";

const FIZZBUZZ: &str = "#include <iostream>

int main() {
    for (int i = 1; i <= 15; i++) {
        /* ANSWER (lab 2.1): loop over the first fifteen numbers
        if (i % 15 == 0) {
            std::cout << \"FizzBuzz\";
        }
    }
    /**
     * ANSWER (2.2)
     * Checking 15 first avoids printing Fizz alone.
     */
}
";

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(&root.join("config.yaml"), CONFIG);
    write(
        &root.join("input/references.yaml"),
        "references:\n  - author: Stroustrup, B.\n    year: 2013\n    title: The C++ Programming Language\n",
    );
    write(&root.join("input/week1/l1-basics-hello_world.cpp"), "int main() { return 0; }\n");
    write(&root.join("input/week1/reflection.md"), "A gentle start.\n");
    write(&root.join("input/week2/l02-loops_and_arrays-fizzbuzz.cpp"), FIZZBUZZ);
    write(&root.join("input/week2/e1-loops-broken.cpp"), "/**\n */\n");
    write(&root.join("input/week2/notes-only.cpp"), "int x;\n");
    write(
        &root.join("input/coursework/main.cpp"),
        "int main() {\n    /* ANSWER (cw 1.1): entry point */\n    return 0;\n}\n",
    );

    dir
}

#[test]
fn test_generate_logbook_from_input_directory() {
    let dir = fixture();
    let grammar = CommentGrammar::default();

    let config = load_config(&dir.path().join("config.yaml")).unwrap();
    let input = read_input_directory(&dir.path().join("input")).unwrap();
    let logbook = build_logbook_context(&grammar, &config, &input);

    assert_eq!(logbook.weeks.len(), 2);
    assert_eq!(logbook.weeks[0].reflection, "A gentle start.");

    let week2 = &logbook.weeks[1];
    assert_eq!(week2.tasks.len(), 1, "broken and misnamed files are skipped");

    let fizzbuzz = week2.tasks.tasks(TaskKind::Lab).next().unwrap();
    assert_eq!(fizzbuzz.number, "02");
    assert_eq!(fizzbuzz.topic, "Loops And Arrays");
    let ScanResult::Annotated(answers) = &fizzbuzz.code else {
        panic!("fizzbuzz should be annotated");
    };
    assert_eq!(
        answers.get("lab_2_1").unwrap()[0].associated_code,
        "#include <iostream>\n\nint main() {\nfor (int i = 1; i <= 15; i++) {"
    );
    assert_eq!(
        answers.get("2_2").unwrap()[0].comment_text,
        "Checking 15 first avoids printing Fizz alone."
    );

    let markdown = MarkdownRenderer::new().render_logbook(&logbook).unwrap();
    assert!(markdown.starts_with("# CS1010: Programming in C++\n"));
    assert!(markdown.contains("- [Week 2](#week-2) (30 September 2024)"));
    assert!(markdown.contains("#### Lab 02: Loops And Arrays, Fizzbuzz"));
    assert!(markdown.contains("Checking 15 first avoids printing Fizz alone."));
    assert!(markdown.contains("### Reflection\n\nA gentle start."));
    assert!(markdown.ends_with("- Stroustrup, B. (2013). *The C++ Programming Language*.\n"));
}

#[test]
fn test_generate_coursework_strips_comments() {
    let dir = fixture();
    let grammar = CommentGrammar::default();

    let input = read_input_directory(&dir.path().join("input")).unwrap();
    let coursework = build_coursework_context(&grammar, input.coursework.as_ref().unwrap()).unwrap();
    let markdown = MarkdownRenderer::new().render_coursework(&coursework).unwrap();

    assert_eq!(
        markdown,
        "## main.cpp\n\n```cpp\nint main() {\n    return 0;\n}\n```\n\n"
    );
}

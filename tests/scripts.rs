use std::fs;

use krait::interpreter::context::BufferContext;
use walkdir::WalkDir;

/// Runs every `.krait` fixture under `tests/scripts` and compares its
/// output against the `.out` file sitting next to it.
#[test]
fn script_fixtures_match_their_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| {
                                         e.path().extension().is_some_and(|ext| ext == "krait")
                                     })
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                           panic!("Failed to read {expected_path:?}: {e}")
                       });

        let mut context = BufferContext::new();
        if let Err(e) = krait::run_program(&source, &mut context) {
            panic!("Script {path:?} failed:\n{source}\nError: {e}");
        }
        assert_eq!(context.contents(), expected, "for script {path:?}");
        count += 1;
    }

    assert!(count > 0, "No script fixtures found in tests/scripts");
}

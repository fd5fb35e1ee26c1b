//! Output path derivation: determinism and flag combinations.

use std::path::{Path, PathBuf};

use cssdts_core::Config;
use rstest::rstest;
use tempfile::TempDir;

#[rstest]
#[case("a.css", false, None, "src/a.css.d.ts")]
#[case("a.css", true, None, "src/a.d.ts")]
#[case("ui/button.module.css", true, None, "src/ui/button.module.d.ts")]
#[case("ui/button.css", false, Some("types"), "types/ui/button.css.d.ts")]
#[case("ui/button.css", true, Some("types"), "types/ui/button.d.ts")]
fn output_path_follows_flags(
    #[case] relative: &str,
    #[case] drop_extension: bool,
    #[case] out_dir: Option<&str>,
    #[case] expected: &str,
) {
    let root = TempDir::new().expect("root");
    let config = Config::new(root.path(), "src")
        .with_drop_extension(drop_extension)
        .with_out_dir(out_dir.map(PathBuf::from));

    let source = root.path().join("src").join(relative);
    assert_eq!(config.output_path(&source), root.path().join(expected));
}

#[test]
fn output_path_is_stable_across_calls() {
    let config = Config::new("/work", "./styles").with_drop_extension(true);
    let source = Path::new("styles/../styles/./x/y.css");

    let first = config.output_path(source);
    for _ in 0..10 {
        assert_eq!(config.output_path(source), first);
    }
    assert_eq!(first, PathBuf::from("/work/styles/x/y.d.ts"));
}

#[test]
fn relative_and_absolute_sources_agree() {
    let config = Config::new("/work", "src");
    assert_eq!(
        config.output_path(Path::new("src/a.css")),
        config.output_path(Path::new("/work/src/a.css")),
    );
}

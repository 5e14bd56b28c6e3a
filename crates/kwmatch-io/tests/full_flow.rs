use std::fs;
use std::path::Path;
use tempfile::TempDir;

use kwmatch_core::config::RunConfig;
use kwmatch_core::summary::{keyword_hit_counts, subjects_with_keyword};
use kwmatch_core::traits::DocumentSource;
use kwmatch_core::Error;
use kwmatch_io::corpus::{list_txt_files, read_text};
use kwmatch_io::{load_keywords, run_pipeline, DirectorySource};

fn seed(root: &Path) -> RunConfig {
    let config = RunConfig::under(root);
    fs::create_dir_all(&config.data_dir).expect("mkdir data");
    fs::write(&config.keywords_path, "机器学习\n  计算机 视觉  \n\nNLP\n机器学习\n")
        .expect("keywords");
    fs::write(config.data_dir.join("张三.txt"), "研究方向：机器学习，计算机视觉。\n\n")
        .expect("doc");
    fs::write(config.data_dir.join("李四.txt"), "\u{FEFF}Interests: NLP（自然语言处理）")
        .expect("doc");
    fs::write(config.data_dir.join("王五.txt"), "教学\r\n\r\n行政").expect("doc");
    fs::write(config.data_dir.join("notes.md"), "机器学习").expect("non-txt");
    config
}

#[test]
fn pipeline_writes_all_outputs() {
    let tmp = TempDir::new().expect("tmp");
    let config = seed(tmp.path());
    let out = run_pipeline(&config).expect("run");

    assert_eq!(out.matches.len(), 3);
    assert_eq!(out.matches["张三"].as_slice(), ["机器学习", "计算机 视觉"]);
    assert_eq!(out.matches["李四"].as_slice(), ["NLP"]);
    assert!(out.matches["王五"].is_empty());

    let cleaned = fs::read_to_string(config.cleaned_dir.join("张三.txt")).expect("cleaned");
    assert_eq!(cleaned, "研究方向:机器学习,计算机视觉.");
    let cleaned = fs::read_to_string(config.cleaned_dir.join("李四.txt")).expect("cleaned");
    assert_eq!(cleaned, "interests: nlp(自然语言处理)");
    let cleaned = fs::read_to_string(config.cleaned_dir.join("王五.txt")).expect("cleaned");
    assert_eq!(cleaned, "教学\n行政");

    let listed = fs::read_to_string(config.keywords_dir.join("张三.txt")).expect("keywords");
    assert_eq!(listed, "机器学习\n计算机 视觉");
    let listed = fs::read_to_string(config.keywords_dir.join("王五.txt")).expect("keywords");
    assert_eq!(listed, "");

    let summary = fs::read_to_string(&config.summary_path).expect("summary");
    let expected = "[关键词命中统计]\n机器学习: 1\n计算机 视觉: 1\nNLP: 1\n机器学习: 1\n\n\
                    [命中关键词最多的教师 Top3]\n张三: 2\n李四: 1\n王五: 0\n\n\
                    [未命中任何关键词的教师]\n王五\n";
    assert_eq!(summary, expected);

    assert_eq!(subjects_with_keyword(&out.matches, "NLP"), ["李四"]);
    assert!(subjects_with_keyword(&out.matches, "nlp").is_empty());
    let listing = keyword_hit_counts(&out.keywords, &out.matches);
    let names: Vec<&str> = listing.iter().map(|c| c.keyword.as_str()).collect();
    assert_eq!(names, ["NLP", "机器学习", "计算机 视觉"]);
}

#[test]
fn missing_keywords_abort_before_any_document() {
    let tmp = TempDir::new().expect("tmp");
    let config = seed(tmp.path());
    fs::remove_file(&config.keywords_path).expect("rm");
    let err = run_pipeline(&config).expect_err("must fail");
    assert!(matches!(err, Error::KeywordsUnavailable { .. }));
    assert!(!config.cleaned_dir.exists());
    assert!(!config.summary_path.exists());
}

#[test]
fn missing_data_dir_is_an_empty_corpus() {
    let tmp = TempDir::new().expect("tmp");
    let config = RunConfig::under(tmp.path());
    fs::write(&config.keywords_path, "a\nb\n").expect("keywords");
    let out = run_pipeline(&config).expect("run");
    assert!(out.matches.is_empty());
    let summary = fs::read_to_string(&config.summary_path).expect("summary");
    let expected = "[关键词命中统计]\na: 0\nb: 0\n\n\
                    [命中关键词最多的教师 Top3]\n无\n\n\
                    [未命中任何关键词的教师]\n无\n";
    assert_eq!(summary, expected);
}

#[test]
fn corpus_lists_only_top_level_txt_sorted() {
    let tmp = TempDir::new().expect("tmp");
    let dir = tmp.path();
    fs::write(dir.join("b.txt"), "x").expect("write");
    fs::write(dir.join("a.txt"), "y").expect("write");
    fs::write(dir.join("c.TXT.bak"), "z").expect("write");
    fs::create_dir(dir.join("nested")).expect("mkdir");
    fs::write(dir.join("nested").join("d.txt"), "w").expect("write");

    let files = list_txt_files(dir);
    assert_eq!(files, [dir.join("a.txt"), dir.join("b.txt")]);
    let docs = DirectorySource::new(dir).documents().expect("docs");
    let subjects: Vec<&str> = docs.iter().map(|d| d.subject.as_str()).collect();
    assert_eq!(subjects, ["a", "b"]);
}

#[test]
fn read_text_strips_bom_and_survives_bad_bytes() {
    let tmp = TempDir::new().expect("tmp");
    let bom = tmp.path().join("bom.txt");
    fs::write(&bom, b"\xEF\xBB\xBFhello").expect("write");
    assert_eq!(read_text(&bom).expect("read"), "hello");

    let bad = tmp.path().join("bad.txt");
    fs::write(&bad, b"ok\xFF\xFEok").expect("write");
    assert_eq!(read_text(&bad).expect("read"), "ok\u{FFFD}\u{FFFD}ok");

    assert!(matches!(read_text(&tmp.path().join("nope.txt")), Err(Error::Io { .. })));
}

#[test]
fn gb18030_documents_are_decoded() {
    let tmp = TempDir::new().expect("tmp");
    let config = RunConfig::under(tmp.path());
    fs::create_dir_all(&config.data_dir).expect("mkdir data");
    fs::write(&config.keywords_path, "机器学习\n").expect("keywords");
    let (bytes, _, unmappable) = encoding_rs::GB18030.encode("研究方向：机器学习");
    assert!(!unmappable);
    assert!(std::str::from_utf8(&bytes).is_err());
    fs::write(config.data_dir.join("张三.txt"), &*bytes).expect("doc");

    let out = run_pipeline(&config).expect("run");
    assert_eq!(out.matches["张三"].as_slice(), ["机器学习"]);
    let cleaned = fs::read_to_string(config.cleaned_dir.join("张三.txt")).expect("cleaned");
    assert_eq!(cleaned, "研究方向:机器学习");
}

#[test]
fn keyword_file_is_trimmed_and_blank_is_valid() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("keywords.txt");
    fs::write(&path, "\u{FEFF} A \nB\n\nA\n").expect("write");
    assert_eq!(load_keywords(&path).expect("load").as_slice(), ["A", "B", "A"]);
    fs::write(&path, "\n \n").expect("write");
    assert!(load_keywords(&path).expect("load").is_empty());
}

use std::fs;
use std::path::Path;

use tenantrag_core::corpus::CorpusReader;
use tenantrag_core::Error;
use tenantrag_lexical::{LexicalRetriever, NO_INFORMATION};

fn retriever(root: &Path, files: &[(&str, &str)]) -> LexicalRetriever {
    let dir = root.join("tenantA");
    fs::create_dir_all(&dir).expect("corpus dir");
    for (name, content) in files {
        fs::write(dir.join(name), content).expect("corpus file");
    }
    LexicalRetriever::new(CorpusReader::new(root))
}

#[test]
fn exact_match_beats_overlap_scoring() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let r = retriever(
        tmp.path(),
        &[
            // Strong word overlap but no exact phrase.
            ("overlap.txt", "Return return policy policy return policy mentioned many times."),
            // Contains the full question verbatim (case differs).
            ("exact.txt", "FAQ. WHAT IS THE RETURN POLICY? Thirty days, no questions asked."),
        ],
    );
    let ans = r.answer("what is the return policy?", "tenantA")?;
    assert_eq!(ans.source.as_deref(), Some("exact.txt"));
    assert!(ans.answer.contains("Thirty days"));
    Ok(())
}

#[test]
fn first_exact_match_in_corpus_order_wins() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let r = retriever(
        tmp.path(),
        &[
            ("b_second.txt", "the phrase appears here too"),
            ("a_first.txt", "the phrase appears here first"),
        ],
    );
    let ans = r.answer("the phrase appears here", "tenantA")?;
    // Files are iterated in sorted filename order.
    assert_eq!(ans.source.as_deref(), Some("a_first.txt"));
    Ok(())
}

#[test]
fn tie_break_prefers_higher_score_at_equal_match_count() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    // Question words: "turquoise" (9) and "cat" (3). Both documents match
    // exactly one word, so match_count ties and score decides.
    let r = retriever(
        tmp.path(),
        &[
            ("short_word.txt", "a cat sat on the mat"),
            ("long_word.txt", "a turquoise wall was painted"),
        ],
    );
    let ans = r.answer("turquoise cat", "tenantA")?;
    assert_eq!(ans.source.as_deref(), Some("long_word.txt"));
    Ok(())
}

#[test]
fn repeated_question_words_count_once() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    // "cat" appears twice in the question but is one distinct word, so
    // match_count ties at 1 and the longer "turquoise" match wins on score.
    let r = retriever(
        tmp.path(),
        &[
            ("cat.txt", "a cat sat on the mat"),
            ("turquoise.txt", "a turquoise wall was painted"),
        ],
    );
    let ans = r.answer("cat cat turquoise", "tenantA")?;
    assert_eq!(ans.source.as_deref(), Some("turquoise.txt"));
    Ok(())
}

#[test]
fn match_count_outranks_score() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    // "encyclopedia" alone scores 12; "red" + "fox" score 6 but match twice.
    let r = retriever(
        tmp.path(),
        &[
            ("one_big.txt", "an encyclopedia of nothing else"),
            ("two_small.txt", "the red fox jumps"),
        ],
    );
    let ans = r.answer("encyclopedia red fox", "tenantA")?;
    assert_eq!(ans.source.as_deref(), Some("two_small.txt"));
    Ok(())
}

#[test]
fn no_matching_word_returns_fixed_message() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let r = retriever(tmp.path(), &[("doc.txt", "completely unrelated content")]);
    let ans = r.answer("zzyzx qwertyuiop", "tenantA")?;
    assert_eq!(ans.answer, NO_INFORMATION);
    assert!(ans.source.is_none());
    Ok(())
}

#[test]
fn corpus_is_reloaded_on_every_call() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let r = retriever(tmp.path(), &[("old.txt", "nothing relevant in here")]);
    let miss = r.answer("manatee", "tenantA")?;
    assert!(miss.source.is_none());

    // New file shows up without any re-index step.
    fs::write(tmp.path().join("tenantA/new.txt"), "facts about the manatee")?;
    let hit = r.answer("manatee", "tenantA")?;
    assert_eq!(hit.source.as_deref(), Some("new.txt"));
    Ok(())
}

#[test]
fn missing_tenant_corpus_is_an_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let r = LexicalRetriever::new(CorpusReader::new(tmp.path()));
    assert!(matches!(
        r.answer("anything", "ghost"),
        Err(Error::CorpusNotFound { .. })
    ));
}

use httpmock::prelude::*;
use scrabble_lab::Lexicon;

#[tokio::test]
async fn test_fetch_word_list_over_http() {
    let server = MockServer::start();

    let word_mock = server.mock(|when, then| {
        when.method(GET).path("/words.txt");
        then.status(200)
            .header("Content-Type", "text/plain")
            .body("CARE\ncares\neat\n  tea  \nx\n\nrate");
    });

    let lexicon = Lexicon::fetch(&server.url("/words.txt")).await.unwrap();
    word_mock.assert();

    // lowercased, trimmed, single letters skipped
    assert!(lexicon.is_word("care"));
    assert!(lexicon.is_word("cares"));
    assert!(lexicon.is_word("tea"));
    assert!(lexicon.is_word("rate"));
    assert!(!lexicon.is_word("x"));
    assert_eq!(lexicon.len(), 5);
}

#[tokio::test]
async fn test_fetch_failure_is_an_error() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/words.txt");
        then.status(500);
    });

    let result = Lexicon::fetch(&server.url("/words.txt")).await;
    assert!(result.is_err());
}

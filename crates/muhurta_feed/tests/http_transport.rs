//! `HttpTransport` against a local mock server.

use std::time::Duration;

use httpmock::prelude::*;
use muhurta_feed::{
    DEFAULT_TIMEOUT, FeedError, FeedSource, FeedTransport, HttpTransport, USER_AGENT,
    fetch_headlines,
};

const RSS: &str = "<rss><channel>\
    <item><title>Nifty hits record</title><link>https://example.com/1</link></item>\
    <item><title>Rupee steady</title><link>https://example.com/2</link></item>\
    <item><title>Third</title><link>https://example.com/3</link></item>\
    </channel></rss>";

#[test]
fn fetches_with_browser_user_agent() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/rss").header("user-agent", USER_AGENT);
        then.status(200).body(RSS);
    });

    let transport = HttpTransport::new(DEFAULT_TIMEOUT).unwrap();
    let body = transport.fetch(&server.url("/rss")).unwrap();
    mock.assert();
    assert!(body.contains("Nifty hits record"));
}

#[test]
fn non_200_is_a_status_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/gone");
        then.status(404);
    });
    let transport = HttpTransport::new(DEFAULT_TIMEOUT).unwrap();
    assert_eq!(
        transport.fetch(&server.url("/gone")),
        Err(FeedError::Status(404))
    );
}

#[test]
fn slow_source_times_out_and_other_source_survives() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/slow");
        then.status(200).body(RSS).delay(Duration::from_millis(1500));
    });
    server.mock(|when, then| {
        when.method(GET).path("/fast");
        then.status(200).body(RSS);
    });

    let transport = HttpTransport::new(Duration::from_millis(300)).unwrap();
    let sources = [
        FeedSource::new("Slow", &server.url("/slow")),
        FeedSource::new("Fast", &server.url("/fast")),
    ];
    let headlines = fetch_headlines(&transport, &sources, 2);
    assert_eq!(headlines.len(), 2);
    assert!(headlines.iter().all(|h| h.source == "Fast"));
    assert_eq!(headlines[0].title, "Nifty hits record");
}

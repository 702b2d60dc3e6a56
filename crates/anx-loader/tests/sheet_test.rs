use anx_loader::{FlowRecord, LineRecord, LineSource, LoaderError, SheetSource};
use mockito::{Matcher, Server};

const LINES_CSV: &str = "\"name\",\"bot_text\",\"defines\"\n\
                         \"start\",\"Hi, what is your name?\",\"name\"\n\
                         \"end\",\"Bye {name}\",\"\"\n";

const FLOWS_CSV: &str = "\"source\",\"answer\",\"target\"\n\"start\",\"\",\"end\"\n";

fn sheet_query(sheet: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("tqx".into(), "out:csv".into()),
        Matcher::UrlEncoded("sheet".into(), sheet.into()),
    ])
}

fn source_for(server: &Server) -> SheetSource {
    SheetSource::builder()
        .base_url(server.url())
        .spreadsheet_id("sheet-id")
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_fetch_both_sheets() {
    let mut server = Server::new_async().await;
    let lines_mock = server
        .mock("GET", "/spreadsheets/d/sheet-id/gviz/tq")
        .match_query(sheet_query("lines"))
        .with_status(200)
        .with_header("content-type", "text/csv")
        .with_body(LINES_CSV)
        .create_async()
        .await;
    let flows_mock = server
        .mock("GET", "/spreadsheets/d/sheet-id/gviz/tq")
        .match_query(sheet_query("flows"))
        .with_status(200)
        .with_body(FLOWS_CSV)
        .create_async()
        .await;

    let dataset = source_for(&server).fetch().await.unwrap();

    lines_mock.assert_async().await;
    flows_mock.assert_async().await;
    assert_eq!(
        dataset.lines,
        vec![
            LineRecord::new("start", "Hi, what is your name?").with_defines("name"),
            LineRecord::new("end", "Bye {name}"),
        ]
    );
    assert_eq!(dataset.flows, vec![FlowRecord::new("start", "end")]);
}

#[tokio::test]
async fn test_error_status() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/spreadsheets/d/sheet-id/gviz/tq")
        .match_query(Matcher::Any)
        .with_status(404)
        .create_async()
        .await;

    let err = source_for(&server).fetch().await.unwrap_err();

    assert!(matches!(err, LoaderError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_custom_sheet_names() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/spreadsheets/d/sheet-id/gviz/tq")
        .match_query(sheet_query("bot_lines"))
        .with_body(LINES_CSV)
        .create_async()
        .await;
    server
        .mock("GET", "/spreadsheets/d/sheet-id/gviz/tq")
        .match_query(sheet_query("bot_flows"))
        .with_body(FLOWS_CSV)
        .create_async()
        .await;

    let source = SheetSource::builder()
        .base_url(server.url())
        .spreadsheet_id("sheet-id")
        .lines_sheet("bot_lines")
        .flows_sheet("bot_flows")
        .build()
        .unwrap();
    let dataset = source.fetch().await.unwrap();

    assert_eq!(dataset.lines.len(), 2);
    assert_eq!(dataset.flows.len(), 1);
    assert_eq!(source.name(), "google-sheets");
}

//! Every client operation against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `IsClient` over real
//! HTTP with the default `UreqTransport`. The institution is swapped for one
//! pointing at the mock, which also checks that `Institution` is the only
//! thing the client needs to reach a different endpoint.

use is_notebooks::institution::MUNI_FACULTIES;
use is_notebooks::{
    ApiError, Faculty, Institution, IsClient, NewNotebook, NotebookEntry, StudentFilter,
    StudyFilter,
};
use xmltree::{Element, XMLNode};

struct MockInstitution {
    api_url: String,
}

impl Institution for MockInstitution {
    fn api_url(&self) -> &str {
        &self.api_url
    }

    fn faculties(&self) -> &[Faculty] {
        &MUNI_FACULTIES
    }
}

fn start_mock_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}{}", mock_server::API_PATH)
}

fn client(api_url: &str, api_key: &str) -> IsClient<MockInstitution> {
    let institution = MockInstitution {
        api_url: api_url.to_string(),
    };
    let fi = *institution.faculty_by_cz_short("FI").unwrap();
    IsClient::new(institution, fi, "PB071", api_key)
}

fn children(root: &Element) -> Vec<&Element> {
    root.children
        .iter()
        .filter_map(|node| match node {
            XMLNode::Element(e) => Some(e),
            _ => None,
        })
        .collect()
}

fn text(root: &Element, child: &str) -> String {
    root.get_child(child)
        .and_then(|e| e.get_text())
        .map(|t| t.into_owned())
        .unwrap_or_default()
}

#[test]
fn notebook_lifecycle() {
    let url = start_mock_server();
    let client = client(&url, mock_server::DEFAULT_API_KEY);

    // Step 1: course info carries the context back.
    let info = client.info().unwrap();
    assert_eq!(info.status(), 200);
    assert_eq!(info.xml().name, "PREDMET_INFO");
    assert_eq!(text(info.xml(), "KOD"), "PB071");
    assert_eq!(text(info.xml(), "FAKULTA"), "1433");

    // Step 2: no notebooks yet.
    let listed = client.notebooks().unwrap();
    assert!(children(listed.xml()).is_empty(), "expected no notebooks");

    // Step 3: create one with default markers.
    let created = client.new_notebook(&NewNotebook::new("Homework 1", "hw1")).unwrap();
    assert_eq!(created.status(), 200);

    // Step 4: it is listed with explicit "n" markers.
    let listed = client.notebooks().unwrap();
    let notebooks = children(listed.xml());
    assert_eq!(notebooks.len(), 1);
    assert_eq!(text(notebooks[0], "JMENO"), "Homework 1");
    assert_eq!(text(notebooks[0], "NAHLIZI"), "n");
    assert_eq!(text(notebooks[0], "STATISTIKA"), "n");

    // Step 5: write an entry; content with non-ASCII survives the query encoding.
    let written = client
        .edit_notebook(&NotebookEntry::new("hw1", 410001, "*4 výborně"))
        .unwrap();
    assert_eq!(written.status(), 200);
    let stamp = text(written.xml(), "ZMENENO");

    // Step 6: writing again without overwrite is refused by the server.
    let refused = client
        .edit_notebook(&NotebookEntry::new("hw1", 410001, "*5"))
        .unwrap();
    assert_eq!(refused.status(), 400);
    assert_eq!(refused.xml().name, "CHYBA");

    // Step 7: overwrite guarded by the last seen stamp.
    let entry = NotebookEntry {
        last_edited: Some(stamp.clone()),
        overwrite: true,
        ..NotebookEntry::new("hw1", 410001, "*5")
    };
    assert_eq!(client.edit_notebook(&entry).unwrap().status(), 200);

    // Step 8: the stale stamp no longer works.
    assert_eq!(client.edit_notebook(&entry).unwrap().status(), 400);

    // Step 9: read back one student, then everyone.
    client
        .edit_notebook(&NotebookEntry::new("hw1", 410002, "*2"))
        .unwrap();
    let one = client.notebook("hw1", &[410001]).unwrap();
    let entries = children(one.xml());
    assert_eq!(entries.len(), 1);
    assert_eq!(text(entries[0], "OBSAH"), "*5");

    let all = client.notebook("hw1", &[]).unwrap();
    assert_eq!(children(all.xml()).len(), 2);
}

#[test]
fn roster_operations() {
    let url = start_mock_server();
    let client = client(&url, mock_server::DEFAULT_API_KEY);

    let enrolled = client.students(&StudentFilter::default()).unwrap();
    assert_eq!(children(enrolled.xml()).len(), 3);

    let with_registered = client
        .students(&StudentFilter {
            registered: true,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(children(with_registered.xml()).len(), 4);

    let everyone = client
        .students(&StudentFilter {
            registered: true,
            ended_study: true,
            inactive_study: true,
        })
        .unwrap();
    assert_eq!(children(everyone.xml()).len(), 6);

    let seminars = client
        .seminar_students(&["01", "02"], &StudyFilter::default())
        .unwrap();
    let groups = children(seminars.xml());
    assert_eq!(groups.len(), 2);
    assert_eq!(children(groups[0]).len(), 2);
    assert_eq!(children(groups[1]).len(), 1);

    let teachers = client.seminar_teachers(&["02"]).unwrap();
    let teachers = children(teachers.xml());
    assert_eq!(teachers.len(), 1);
    assert_eq!(text(teachers[0], "UCO"), "255002");

    let dates = client
        .exam_dates(&StudyFilter {
            ended_study: true,
            inactive_study: true,
        })
        .unwrap();
    let dates = children(dates.xml());
    assert_eq!(dates.len(), 2);
    assert_eq!(children(dates[1].get_child("PRIHLASENI").unwrap()).len(), 2);
}

#[test]
fn wrong_key_is_returned_as_data() {
    let url = start_mock_server();
    let client = client(&url, "not-the-key");

    let resp = client.info().unwrap();
    assert_eq!(resp.status(), 403);
    assert_eq!(resp.xml().name, "CHYBA");
}

#[test]
fn connection_refused_is_transport_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = client(&format!("http://{addr}/export/pb_blok_api"), "key");

    let err = client.notebooks().unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

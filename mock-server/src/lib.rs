//! In-memory stand-in for the IS notebook export endpoint.
//!
//! Serves `GET /export/pb_blok_api` and answers every `operace` the client
//! knows with a small XML document. The roster, seminars and exam dates are
//! seeded constants; notebooks live in memory for the lifetime of the router.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{error, info, warn};
use xmltree::{Element, XMLNode};

pub const API_PATH: &str = "/export/pb_blok_api";
pub const DEFAULT_API_KEY: &str = "test-key";

const CONTEXT_KEYS: [&str; 3] = ["klic", "fakulta", "kod"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StudyState {
    Enrolled,
    /// Registered for the course but not yet enrolled.
    Registered,
    Ended,
    Inactive,
}

#[derive(Clone, Copy, Debug)]
pub struct Student {
    pub uco: u64,
    pub name: &'static str,
    pub seminar: &'static str,
    pub state: StudyState,
}

pub const ROSTER: [Student; 6] = [
    Student { uco: 410001, name: "Jana Nováková", seminar: "01", state: StudyState::Enrolled },
    Student { uco: 410002, name: "Petr Svoboda", seminar: "01", state: StudyState::Enrolled },
    Student { uco: 410003, name: "Eva Dvořáková", seminar: "02", state: StudyState::Enrolled },
    Student { uco: 410004, name: "Tomáš Černý", seminar: "02", state: StudyState::Registered },
    Student { uco: 410005, name: "Lucie Veselá", seminar: "01", state: StudyState::Ended },
    Student { uco: 410006, name: "Martin Král", seminar: "02", state: StudyState::Inactive },
];

/// (seminar, teacher uco, teacher name)
pub const TEACHERS: [(&str, u64, &str); 2] = [
    ("01", 255001, "Ondřej Malý"),
    ("02", 255002, "Hana Bílá"),
];

/// (date, room, signed-up students)
pub const EXAM_DATES: [(&str, &str, &[u64]); 2] = [
    ("2027-01-12 09:00", "D1", &[410001, 410003, 410005]),
    ("2027-01-26 14:00", "D2", &[410002, 410006]),
];

#[derive(Clone, Debug)]
pub struct Entry {
    pub content: String,
    pub changed: String,
}

#[derive(Clone, Debug)]
pub struct Notebook {
    pub name: String,
    pub short_name: String,
    pub visible: bool,
    pub no_fill_in: bool,
    pub statistics: bool,
    pub entries: BTreeMap<u64, Entry>,
}

#[derive(Debug)]
pub struct Store {
    api_key: String,
    notebooks: Vec<Notebook>,
    revision: u64,
}

impl Store {
    fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            notebooks: Vec::new(),
            revision: 0,
        }
    }

    fn notebook(&self, short_name: &str) -> Result<&Notebook, Failure> {
        self.notebooks
            .iter()
            .find(|n| n.short_name == short_name)
            .ok_or_else(|| bad_request(format!("Blok {short_name} neexistuje.")))
    }

    /// Change stamps only need to be unique and ordered.
    fn next_stamp(&mut self) -> String {
        self.revision += 1;
        format!("{:014}", self.revision)
    }
}

pub type Db = Arc<RwLock<Store>>;

type Failure = (StatusCode, String);
type Reply = Result<Element, Failure>;

pub fn app() -> Router {
    app_with_key(DEFAULT_API_KEY)
}

pub fn app_with_key(api_key: &str) -> Router {
    let db: Db = Arc::new(RwLock::new(Store::new(api_key)));
    Router::new().route(API_PATH, get(dispatch)).with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Ordered query pairs with repeated keys kept.
struct Params(Vec<(String, String)>);

impl Params {
    fn value(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    fn values(&self, key: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    fn count(&self, key: &str) -> usize {
        self.0.iter().filter(|(k, _)| k == key).count()
    }

    fn flag(&self, key: &str) -> bool {
        self.value(key) == Some("a")
    }

    fn required(&self, key: &str) -> Result<&str, Failure> {
        self.value(key)
            .ok_or_else(|| bad_request(format!("Chybí parametr {key}.")))
    }

    fn marker(&self, key: &str) -> Result<bool, Failure> {
        match self.value(key) {
            None | Some("n") => Ok(false),
            Some("a") => Ok(true),
            Some(other) => Err(bad_request(format!("Neplatná hodnota {key}={other}."))),
        }
    }
}

async fn dispatch(State(db): State<Db>, Query(pairs): Query<Vec<(String, String)>>) -> Response {
    let params = Params(pairs);
    let operation = params.value("operace").unwrap_or_default().to_string();

    let reply = handle(&db, &params, &operation).await;
    match &reply {
        Ok(_) => info!(%operation, "handled"),
        Err((status, message)) => warn!(%operation, %status, %message, "rejected"),
    }

    match reply {
        Ok(root) => xml_response(StatusCode::OK, &root),
        Err((status, message)) => xml_response(status, &text_element("CHYBA", message)),
    }
}

async fn handle(db: &Db, params: &Params, operation: &str) -> Reply {
    for key in CONTEXT_KEYS {
        if params.count(key) > 1 {
            return Err(bad_request(format!("Parametr {key} je zadán vícekrát.")));
        }
    }
    {
        let store = db.read().await;
        if params.value("klic") != Some(store.api_key.as_str()) {
            return Err((StatusCode::FORBIDDEN, "Neplatný klíč.".to_string()));
        }
    }
    let course = params.required("kod")?;
    let faculty = params.required("fakulta")?;

    match operation {
        "predmet-info" => Ok(course_info(course, faculty)),
        "predmet-seznam" => Ok(students(params)),
        "seminar-seznam" => Ok(seminar_students(params)),
        "seminar-cvicici-seznam" => Ok(seminar_teachers(params)),
        "bloky-seznam" => Ok(notebooks(&*db.read().await)),
        "blok-novy" => new_notebook(&mut *db.write().await, params),
        "blok-dej-obsah" => notebook_content(&*db.read().await, params),
        "blok-pis-student-obsah" => edit_notebook(&mut *db.write().await, params),
        "terminy-seznam" => Ok(exam_dates(params)),
        "" => Err(bad_request("Chybí parametr operace.".to_string())),
        other => Err(bad_request(format!("Neznámá operace {other}."))),
    }
}

fn course_info(course: &str, faculty: &str) -> Element {
    element(
        "PREDMET_INFO",
        vec![
            text_element("FAKULTA", faculty),
            text_element("KOD", course),
            text_element("NAZEV", "Mock course"),
            text_element("POCET_STUDENTU", ROSTER.len().to_string()),
        ],
    )
}

/// Enrolled students always count; the others only when asked for.
fn included(student: &Student, params: &Params, with_registered: bool) -> bool {
    match student.state {
        StudyState::Enrolled => true,
        StudyState::Registered => with_registered && params.flag("zareg"),
        StudyState::Ended => params.flag("vcukonc"),
        StudyState::Inactive => params.flag("vcneaktiv"),
    }
}

fn student_element(student: &Student) -> Element {
    element(
        "STUDENT",
        vec![
            text_element("UCO", student.uco.to_string()),
            text_element("JMENO", student.name),
            text_element("SEMINAR", student.seminar),
        ],
    )
}

fn students(params: &Params) -> Element {
    let children = ROSTER
        .iter()
        .filter(|s| included(s, params, true))
        .map(student_element)
        .collect();
    element("PREDMET_STUDENTI_INFO", children)
}

fn seminar_students(params: &Params) -> Element {
    let seminars = params.values("seminar");
    let children = seminars
        .iter()
        .map(|seminar| {
            let mut group = element(
                "SEMINAR",
                ROSTER
                    .iter()
                    .filter(|s| s.seminar == *seminar && included(s, params, false))
                    .map(student_element)
                    .collect(),
            );
            group.attributes.insert("oznaceni".to_string(), seminar.to_string());
            group
        })
        .collect();
    element("SEMINAR_STUDENTI_INFO", children)
}

fn seminar_teachers(params: &Params) -> Element {
    let seminars = params.values("seminar");
    let children = TEACHERS
        .iter()
        .filter(|(seminar, _, _)| seminars.contains(seminar))
        .map(|(seminar, uco, name)| {
            element(
                "CVICICI",
                vec![
                    text_element("SEMINAR", *seminar),
                    text_element("UCO", uco.to_string()),
                    text_element("JMENO", *name),
                ],
            )
        })
        .collect();
    element("SEMINAR_CVICICI_INFO", children)
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "a"
    } else {
        "n"
    }
}

fn notebooks(store: &Store) -> Element {
    let children = store
        .notebooks
        .iter()
        .map(|n| {
            element(
                "POZN_BLOK_INFO",
                vec![
                    text_element("JMENO", n.name.as_str()),
                    text_element("ZKRATKA", n.short_name.as_str()),
                    text_element("NAHLIZI", yes_no(n.visible)),
                    text_element("NEDOPLNOVAT", yes_no(n.no_fill_in)),
                    text_element("STATISTIKA", yes_no(n.statistics)),
                ],
            )
        })
        .collect();
    element("BLOKY_SEZNAM", children)
}

fn new_notebook(store: &mut Store, params: &Params) -> Reply {
    let name = params.required("jmeno")?;
    let short_name = params.required("zkratka")?;
    if store.notebooks.iter().any(|n| n.short_name == short_name) {
        return Err(bad_request(format!("Blok {short_name} již existuje.")));
    }
    store.notebooks.push(Notebook {
        name: name.to_string(),
        short_name: short_name.to_string(),
        visible: params.marker("nahlizi")?,
        no_fill_in: params.marker("nedoplnovat")?,
        statistics: params.marker("statistika")?,
        entries: BTreeMap::new(),
    });
    Ok(element("NOVY_BLOK_OK", Vec::new()))
}

fn parse_uco(value: &str) -> Result<u64, Failure> {
    value
        .parse()
        .map_err(|_| bad_request(format!("Neplatné UČO {value}.")))
}

fn notebook_content(store: &Store, params: &Params) -> Reply {
    let notebook = store.notebook(params.required("zkratka")?)?;
    let wanted = params
        .values("uco")
        .into_iter()
        .map(parse_uco)
        .collect::<Result<Vec<u64>, Failure>>()?;

    let children = notebook
        .entries
        .iter()
        .filter(|(uco, _)| wanted.is_empty() || wanted.contains(uco))
        .map(|(uco, entry)| {
            element(
                "STUDENT",
                vec![
                    text_element("UCO", uco.to_string()),
                    text_element("OBSAH", entry.content.as_str()),
                    text_element("ZMENENO", entry.changed.as_str()),
                ],
            )
        })
        .collect();
    Ok(element("BLOKY_OBSAH", children))
}

fn edit_notebook(store: &mut Store, params: &Params) -> Reply {
    let short_name = params.required("zkratka")?;
    let uco = parse_uco(params.required("uco")?)?;
    let content = params.required("obsah")?;
    let overwrite = params.marker("prepis")?;
    let last_edited = params.value("poslzmeneno");

    if let Some(existing) = store.notebook(short_name)?.entries.get(&uco) {
        if let Some(seen) = last_edited {
            if seen != existing.changed {
                return Err(bad_request(format!(
                    "Obsah pro {uco} byl změněn {}.",
                    existing.changed
                )));
            }
        }
        if !overwrite {
            return Err(bad_request(format!("Obsah pro {uco} již existuje.")));
        }
    }

    let changed = store.next_stamp();
    let notebook = store
        .notebooks
        .iter_mut()
        .find(|n| n.short_name == short_name)
        .ok_or_else(|| bad_request(format!("Blok {short_name} neexistuje.")))?;
    notebook.entries.insert(
        uco,
        Entry {
            content: content.to_string(),
            changed: changed.clone(),
        },
    );
    Ok(element("ZAPIS_OK", vec![text_element("ZMENENO", changed)]))
}

fn exam_dates(params: &Params) -> Element {
    let children = EXAM_DATES
        .iter()
        .map(|(date, room, signed_up)| {
            let students = ROSTER
                .iter()
                .filter(|s| signed_up.contains(&s.uco) && included(s, params, false))
                .map(|s| text_element("UCO", s.uco.to_string()))
                .collect();
            element(
                "TERMIN",
                vec![
                    text_element("DATUM", *date),
                    text_element("MISTNOST", *room),
                    element("PRIHLASENI", students),
                ],
            )
        })
        .collect();
    element("TERMINY_SEZNAM", children)
}

fn bad_request(message: String) -> Failure {
    (StatusCode::BAD_REQUEST, message)
}

fn element(name: &str, children: Vec<Element>) -> Element {
    let mut root = Element::new(name);
    root.children = children.into_iter().map(XMLNode::Element).collect();
    root
}

fn text_element(name: &str, text: impl Into<String>) -> Element {
    let mut root = Element::new(name);
    root.children.push(XMLNode::Text(text.into()));
    root
}

fn xml_response(status: StatusCode, root: &Element) -> Response {
    let mut body = Vec::new();
    if let Err(e) = root.write(&mut body) {
        error!(error = %e, "failed to render XML");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    (
        status,
        [(header::CONTENT_TYPE, "text/xml; charset=utf-8")],
        body,
    )
        .into_response()
}

use crate::infra::{
    InMemoryDocumentStore, InMemoryObjectStorage, InMemoryRealtimeStore, TracingNotifier,
};
use admissions::error::AppError;
use admissions::workflows::documents::{
    DocumentFile, DocumentForm, DocumentType, StagedDocument, MAX_DOCUMENT_BYTES,
};
use admissions::workflows::prerequisites::{
    DetailsState, PrerequisiteDetails, PrerequisiteForm, ProgramWatcher, QueryParams,
    CERTIFICATES, PROGRAMS,
};
use clap::Args;
use serde_json::json;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Application id used for the document intake portion of the demo.
    #[arg(long, default_value_t = 42)]
    pub(crate) application_id: i64,
}

fn small_file(name: &str, size: usize) -> DocumentFile {
    DocumentFile {
        name: name.to_string(),
        bytes: vec![0u8; size],
    }
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("== Applicant document intake ==");

    let objects = Arc::new(InMemoryObjectStorage::default());
    let documents = Arc::new(InMemoryDocumentStore::default());
    let mut form = DocumentForm::new(
        args.application_id,
        objects.clone(),
        documents.clone(),
        Arc::new(TracingNotifier),
    );

    let transcript = StagedDocument::new(
        DocumentType::Transcript,
        small_file("t.pdf", 2 * 1024 * 1024),
    )
    .expect("2MB transcript stages");
    form.stage(transcript).expect("transcript stages");
    println!("staged transcript t.pdf");

    match StagedDocument::new(DocumentType::Certificate, small_file("big.pdf", MAX_DOCUMENT_BYTES))
    {
        Err(err) => println!("oversize file rejected: {err}"),
        Ok(_) => unreachable!("files at the cap never stage"),
    }

    let duplicate = StagedDocument::new(DocumentType::Transcript, small_file("t2.pdf", 100))
        .expect("small file stages");
    if form.stage(duplicate).is_err() {
        println!("duplicate transcript rejected; staged set unchanged");
    }

    let identity = StagedDocument::new(
        DocumentType::IdentityDocument,
        small_file("passport.png", 80_000),
    )
    .expect("small file stages");
    form.stage(identity).expect("identity document stages");

    let outcome = form
        .submit()
        .await
        .expect("demo batch uploads against in-memory stores");
    println!(
        "submitted {} documents ({} upload(s) accepted), redirecting to '{}'",
        outcome.persisted,
        objects.uploads().len(),
        outcome.redirect
    );
    for record in documents.records() {
        println!(
            "  persisted {} -> {} (application {})",
            record.file_name, record.url, record.application_id
        );
    }

    println!();
    println!("== Admin prerequisite management ==");

    let store = Arc::new(InMemoryRealtimeStore::default());
    store.seed(CERTIFICATES, "cert-1", json!({ "name": "Nursing Diploma" }));
    store.seed(
        PROGRAMS,
        "prog-4",
        json!({ "name": "Nursing", "prerequisites": [] }),
    );

    let params = QueryParams::parse("?certificate=cert-1&id=prog-4");
    let mut details = PrerequisiteDetails::new(params, store.clone());
    details.load().await;
    let certificate = match details.state() {
        DetailsState::Loaded(certificate) => certificate.clone(),
        other => panic!("demo certificate should load, got {other:?}"),
    };
    println!("loaded certificate '{}'", certificate.name);

    let mut watcher = ProgramWatcher::start(store.as_ref(), "prog-4");
    let form = PrerequisiteForm::new(certificate, "prog-4", store.clone());
    let added = form.add("Anatomy 101").await?;
    println!("added prerequisite '{}' ({})", added.name, added.id);

    watcher.apply_pending();
    if let Some(program) = watcher.program() {
        println!(
            "live mirror of '{}' now lists {} prerequisite(s)",
            program.name,
            program.prerequisites.len()
        );
    }

    watcher.stop();
    form.add("Biology 101").await?;
    println!(
        "after teardown the mirror ignored the next write ({} pending update(s))",
        watcher.apply_pending()
    );

    Ok(())
}

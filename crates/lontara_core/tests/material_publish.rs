use chrono::{TimeZone, Utc};
use lontara_core::model::material::ALL_CLASSES;
use lontara_core::{
    AspectRatio, EventKind, EventLogRepository, KvEventLog, KvNotificationRepository,
    MaterialDraft, MaterialError, MaterialService, MemoryKvStore, NotificationCenter,
    NotificationPolicy, RichDocument, SessionUser, UserRole, NEW_MATERIAL_EVENT_TYPE,
};

fn guru() -> SessionUser {
    SessionUser::new(UserRole::Guru, "Bu Sari", "sekolah-1")
}

fn draft(title: &str) -> MaterialDraft {
    let mut doc = RichDocument::new();
    doc.push_heading(2, title);
    doc.push_paragraph("Rumah adat suku Toraja.");
    let image = doc
        .insert_image("data:image/png;base64,iVBORw0KGgo=", "tongkonan.png")
        .unwrap();
    doc.set_frame_width(image, 80).unwrap();
    doc.set_aspect_ratio(image, Some(AspectRatio::Wide)).unwrap();

    MaterialDraft {
        id: None,
        title: title.to_string(),
        content: doc.render_html(),
        target_class: Some("X-1".to_string()),
        learning_objectives: "Memahami arsitektur tradisional".to_string(),
        learning_goals: "Menjelaskan fungsi tongkonan".to_string(),
        graduate_profile: vec!["Berkebinekaan global".to_string()],
        duration_jp: 2,
        video_url: None,
    }
}

#[test]
fn publishing_reaches_student_inbox() {
    let store = MemoryKvStore::new();
    let now = Utc.with_ymd_and_hms(2024, 9, 2, 8, 0, 0).unwrap();
    let mut materials = MaterialService::new(KvEventLog::new(&store), Vec::new());

    let created = materials.save(&guru(), draft("Tongkonan"), now).unwrap().clone();
    assert_eq!(created.school_id, "sekolah-1");
    assert_eq!(created.views, 0);
    assert!(created.content.contains("aspect-w-16 aspect-h-9"));

    let events = KvEventLog::new(&store).load_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::NewMaterialPublished);
    assert_eq!(events[0].kind.as_wire(), NEW_MATERIAL_EVENT_TYPE);
    assert_eq!(events[0].title(), Some("Tongkonan"));
    assert_eq!(events[0].timestamp, now);

    let mut center = NotificationCenter::new(
        KvEventLog::new(&store),
        KvNotificationRepository::new(&store),
        NotificationPolicy::default(),
    );
    let inbox = center.set_session(Some(SessionUser::new(UserRole::Siswa, "Andi", "sekolah-1")));
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].message, "Materi baru: \"Tongkonan\"");
}

#[test]
fn updates_do_not_emit_events() {
    let store = MemoryKvStore::new();
    let now = Utc.with_ymd_and_hms(2024, 9, 2, 8, 0, 0).unwrap();
    let mut materials = MaterialService::new(KvEventLog::new(&store), Vec::new());
    let created_id = materials.save(&guru(), draft("Tongkonan"), now).unwrap().id;

    let mut edit = draft("Tongkonan (revisi)");
    edit.id = Some(created_id);
    edit.target_class = None;
    let updated = materials.save(&guru(), edit, now).unwrap();
    assert_eq!(updated.title, "Tongkonan (revisi)");
    assert_eq!(updated.target_class, "X-1");

    assert_eq!(KvEventLog::new(&store).load_events().len(), 1);
    assert_eq!(materials.materials().len(), 1);
}

#[test]
fn students_cannot_publish_and_drafts_are_validated() {
    let store = MemoryKvStore::new();
    let now = Utc::now();
    let mut materials = MaterialService::new(KvEventLog::new(&store), Vec::new());
    let student = SessionUser::new(UserRole::Siswa, "Andi", "sekolah-1");

    assert_eq!(
        materials.save(&student, draft("x"), now).unwrap_err(),
        MaterialError::Forbidden
    );

    let mut blank = draft("Kosong");
    let mut doc = RichDocument::new();
    doc.push_paragraph("   ");
    blank.content = doc.render_html();
    assert_eq!(
        materials.save(&guru(), blank, now).unwrap_err(),
        MaterialError::MissingField("content")
    );

    let mut no_profile = draft("Profil");
    no_profile.graduate_profile.clear();
    assert_eq!(
        materials.save(&guru(), no_profile, now).unwrap_err(),
        MaterialError::MissingField("graduate_profile")
    );

    let mut unknown = draft("Hilang");
    unknown.id = Some(uuid_like());
    assert!(matches!(
        materials.save(&guru(), unknown, now),
        Err(MaterialError::NotFound(_))
    ));

    assert!(KvEventLog::new(&store).load_events().is_empty());
}

#[test]
fn event_log_failure_does_not_fail_save() {
    let store = MemoryKvStore::new();
    store.set_reject_writes(true);
    let mut materials = MaterialService::new(KvEventLog::new(&store), Vec::new());

    let created = materials.save(&guru(), draft("Tongkonan"), Utc::now());
    assert!(created.is_ok());
    assert!(KvEventLog::new(&store).load_events().is_empty());
}

#[test]
fn school_and_class_filters_apply() {
    let store = MemoryKvStore::new();
    let now = Utc::now();
    let mut materials = MaterialService::new(KvEventLog::new(&store), Vec::new());
    materials.save(&guru(), draft("kelas X-1"), now).unwrap();
    let mut for_all = draft("semua kelas");
    for_all.target_class = Some(ALL_CLASSES.to_string());
    materials.save(&guru(), for_all, now).unwrap();
    let other_school = SessionUser::new(UserRole::Admin, "Pak Amir", "sekolah-2");
    materials.save(&other_school, draft("lain"), now).unwrap();

    assert_eq!(materials.list_for_school("sekolah-1", None).len(), 2);
    assert_eq!(materials.list_for_school("sekolah-1", Some(ALL_CLASSES)).len(), 2);
    let x2: Vec<&str> = materials
        .list_for_school("sekolah-1", Some("X-2"))
        .into_iter()
        .map(|m| m.title.as_str())
        .collect();
    assert_eq!(x2, vec!["semua kelas"]);

    let id = materials.list_for_school("sekolah-2", None)[0].id;
    assert_eq!(materials.toggle_favorite(id), Ok(true));
    assert_eq!(materials.toggle_favorite(id), Ok(false));
}

fn uuid_like() -> lontara_core::MaterialId {
    lontara_core::MaterialId::from_u128(0x1111_2222_4333_8444_5555_5555_5555_5555)
}

#[test]
fn media_only_materials_can_be_published() {
    let store = MemoryKvStore::new();
    let now = Utc.with_ymd_and_hms(2024, 9, 3, 8, 0, 0).unwrap();
    let mut materials = MaterialService::new(KvEventLog::new(&store), Vec::new());

    let mut image_only = draft("Galeri Tongkonan");
    let mut doc = RichDocument::new();
    doc.insert_image("images/tongkonan.jpg", "").unwrap();
    image_only.content = doc.render_html();
    materials.save(&guru(), image_only, now).unwrap();

    let mut video_only = draft("Ma'nene");
    let mut doc = RichDocument::new();
    doc.insert_video("https://example.com/ma-nene.mp4").unwrap();
    video_only.content = doc.render_html();
    materials.save(&guru(), video_only, now).unwrap();

    assert_eq!(materials.materials().len(), 2);
    assert_eq!(KvEventLog::new(&store).load_events().len(), 2);
}

#[test]
fn comments_are_trimmed_and_kept_newest_first() {
    let store = MemoryKvStore::new();
    let now = Utc.with_ymd_and_hms(2024, 9, 4, 8, 0, 0).unwrap();
    let mut materials = MaterialService::new(KvEventLog::new(&store), Vec::new());
    let id = materials.save(&guru(), draft("Tongkonan"), now).unwrap().id;
    let student = SessionUser::new(UserRole::Siswa, "Andi", "sekolah-1");

    assert_eq!(
        materials.add_comment(&student, id, "   ", now).unwrap_err(),
        MaterialError::MissingField("comment")
    );

    let first = materials
        .add_comment(&student, id, "  Menarik sekali!  ", now)
        .unwrap()
        .clone();
    assert_eq!(first.content, "Menarik sekali!");
    assert_eq!(first.author, "Andi");
    assert_eq!(first.user_type, UserRole::Siswa);
    assert_eq!(first.id, format!("c{}", now.timestamp_millis()));

    let later = now + chrono::Duration::minutes(5);
    materials
        .add_comment(&guru(), id, "Terima kasih.", later)
        .unwrap();

    let comments = &materials.get(id).unwrap().comments;
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].content, "Terima kasih.");
    assert_eq!(comments[1].content, "Menarik sekali!");
}

#[test]
fn only_content_managers_delete_comments() {
    let store = MemoryKvStore::new();
    let now = Utc.with_ymd_and_hms(2024, 9, 4, 8, 0, 0).unwrap();
    let mut materials = MaterialService::new(KvEventLog::new(&store), Vec::new());
    let id = materials.save(&guru(), draft("Tongkonan"), now).unwrap().id;
    let student = SessionUser::new(UserRole::Siswa, "Andi", "sekolah-1");
    let comment_id = materials
        .add_comment(&student, id, "Pertanyaan", now)
        .unwrap()
        .id
        .clone();

    assert_eq!(
        materials.delete_comment(&student, id, &comment_id),
        Err(MaterialError::Forbidden)
    );
    assert_eq!(materials.delete_comment(&guru(), id, &comment_id), Ok(true));
    assert_eq!(materials.delete_comment(&guru(), id, &comment_id), Ok(false));
    assert!(materials.get(id).unwrap().comments.is_empty());
}

//! Demo data for a fresh register: three well-known letters plus a
//! randomized batch spread across every status.

use chrono::{Duration, NaiveDate, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::enums::{Department, DocumentStatus};
use crate::models::DocumentInput;
use crate::store::{DocumentStore, StoreError};

/// How many generated letters to create per status.
const GENERATED_PER_STATUS: [(DocumentStatus, usize); 4] = [
    (DocumentStatus::Received, 5),
    (DocumentStatus::InProgress, 8),
    (DocumentStatus::Completed, 12),
    (DocumentStatus::Rejected, 2),
];

/// Attempts per generated letter before giving up on finding a free register number.
const MAX_NUMBER_ATTEMPTS: usize = 20;

const SENDERS: &[&str] = &[
    "Andi Pratama",
    "Budi Hartono",
    "Citra Lestari",
    "Dewi Anggraini",
    "Eko Saputra",
    "Fitri Handayani",
    "Gilang Ramadhan",
    "Hendra Wijaya",
    "Indah Permatasari",
    "Joko Susilo",
];

const OPD_NAMES: &[&str] = &[
    "Dinas Pendidikan",
    "Dinas Kesehatan",
    "Dinas Pekerjaan Umum",
    "Dinas Sosial",
    "Dinas Keuangan",
    "Sekretariat Daerah",
];

const SUBJECTS: &[&str] = &[
    "Permohonan mutasi pegawai antar unit kerja",
    "Usulan kenaikan pangkat reguler periode April",
    "Laporan kehadiran pegawai bulan lalu",
    "Permohonan cuti besar pegawai",
    "Pengajuan formasi CPNS tahun anggaran berikutnya",
    "Permintaan data kepegawaian untuk evaluasi kinerja",
];

const RECEIVERS: &[&str] = &[
    "Kepala Bidang Mutasi",
    "Kepala Bagian Kepegawaian",
    "Kepala Bidang Pengembangan",
    "Kepala Bagian Administrasi",
];

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn fixed_documents(today: NaiveDate) -> Vec<DocumentInput> {
    let day = |n: i64| Some(format_date(today - Duration::days(n)));
    vec![
        DocumentInput {
            register_number: Some("DOC-2024-0001".into()),
            sender_name: Some("Dr. Ahmad Fauzi".into()),
            opd_name: Some("Dinas Kesehatan Kota".into()),
            letter_number: Some("001/DKK/2024".into()),
            letter_subject: Some(
                "Permohonan Penambahan Tenaga Medis di Puskesmas Wilayah Timur".into(),
            ),
            receiver_name: Some("Kepala Bagian Kepegawaian".into()),
            incoming_date: day(5),
            status: Some(DocumentStatus::InProgress.as_str().into()),
            department: Some(Department::Personnel.as_str().into()),
            update_date: day(2),
            notes: Some("Sedang dalam proses verifikasi kebutuhan dan anggaran.".into()),
        },
        DocumentInput {
            register_number: Some("DOC-2024-0002".into()),
            sender_name: Some("Prof. Siti Nurhaliza".into()),
            opd_name: Some("Dinas Pendidikan Provinsi".into()),
            letter_number: Some("045/DISDIK/2024".into()),
            letter_subject: Some("Usulan Program Pelatihan Guru Berbasis Digital".into()),
            receiver_name: Some("Kepala Bidang Pengembangan".into()),
            incoming_date: day(10),
            status: Some(DocumentStatus::Completed.as_str().into()),
            department: Some(Department::Development.as_str().into()),
            update_date: day(1),
            notes: Some("Program telah disetujui dan akan dimulai pada bulan depan.".into()),
        },
        DocumentInput {
            register_number: Some("DOC-2024-0003".into()),
            sender_name: Some("Ir. Budi Santoso".into()),
            opd_name: Some("Dinas Pekerjaan Umum".into()),
            letter_number: Some("123/DPU/2024".into()),
            letter_subject: Some("Laporan Kerusakan Infrastruktur Jalan Protokol".into()),
            receiver_name: Some("Kepala Bagian Administrasi".into()),
            incoming_date: day(3),
            status: Some(DocumentStatus::Received.as_str().into()),
            department: Some(Department::Administration.as_str().into()),
            update_date: day(3),
            notes: None,
        },
    ]
}

fn pick<'a, R: Rng>(rng: &mut R, values: &[&'a str]) -> &'a str {
    values.choose(rng).copied().unwrap_or_default()
}

fn digits<R: Rng>(rng: &mut R, count: usize) -> String {
    (0..count).map(|_| char::from(b'0' + rng.gen_range(0..10u8))).collect()
}

fn generated_document<R: Rng>(
    rng: &mut R,
    today: NaiveDate,
    status: DocumentStatus,
) -> DocumentInput {
    let incoming = today - Duration::days(rng.gen_range(0..=180));
    let handled = today - Duration::days(rng.gen_range(0..=90));
    let department = Department::ALL
        .choose(rng)
        .copied()
        .unwrap_or(Department::Administration);
    let notes = rng
        .gen_bool(0.5)
        .then(|| "Menunggu kelengkapan berkas pendukung.".to_string());

    DocumentInput {
        register_number: Some(format!("DOC-{}-{}", digits(rng, 4), digits(rng, 4))),
        sender_name: Some(pick(rng, SENDERS).into()),
        opd_name: Some(pick(rng, OPD_NAMES).into()),
        letter_number: Some(format!("{}/{}/{}", digits(rng, 3), digits(rng, 3), digits(rng, 4))),
        letter_subject: Some(pick(rng, SUBJECTS).into()),
        receiver_name: Some(pick(rng, RECEIVERS).into()),
        incoming_date: Some(format_date(incoming)),
        status: Some(status.as_str().into()),
        department: Some(department.as_str().into()),
        update_date: Some(format_date(handled)),
        notes,
    }
}

/// Insert the demo letters. Returns how many documents were created.
pub fn seed_sample_documents<R: Rng>(
    store: &dyn DocumentStore,
    rng: &mut R,
) -> Result<usize, StoreError> {
    let today = Utc::now().date_naive();
    let mut created = 0;

    for (status, count) in GENERATED_PER_STATUS {
        for _ in 0..count {
            let mut attempts = 0;
            loop {
                attempts += 1;
                match store.create(&generated_document(rng, today, status)) {
                    Ok(_) => {
                        created += 1;
                        break;
                    }
                    // Only a register number collision can fail a generated letter
                    Err(StoreError::Validation(errors))
                        if errors.contains("register_number") && attempts < MAX_NUMBER_ATTEMPTS =>
                    {
                        continue;
                    }
                    Err(e) => return Err(e),
                }
            }
        }
    }

    for input in fixed_documents(today) {
        match store.create(&input) {
            Ok(_) => created += 1,
            Err(StoreError::Validation(errors)) if errors.contains("register_number") => {
                tracing::debug!(
                    register_number = input.register_number.as_deref().unwrap_or_default(),
                    "Sample document already present"
                );
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!(created, "Sample documents seeded");
    Ok(created)
}

/// Seed only when the register holds no documents yet.
pub fn seed_if_empty<R: Rng>(
    store: &dyn DocumentStore,
    rng: &mut R,
) -> Result<Option<usize>, StoreError> {
    if store.count()? > 0 {
        tracing::debug!("Register not empty, skipping sample data");
        return Ok(None);
    }
    seed_sample_documents(store, rng).map(Some)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::models::DocumentFilter;
    use crate::store::SqliteDocumentStore;

    #[test]
    fn seeds_fixed_and_generated_documents() {
        let store = SqliteDocumentStore::open_in_memory().unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let created = seed_sample_documents(&store, &mut rng).unwrap();
        assert_eq!(created, 30);
        assert_eq!(store.count().unwrap(), 30);

        let doc = store.find_by_register_number("DOC-2024-0001").unwrap().unwrap();
        assert_eq!(doc.sender_name, "Dr. Ahmad Fauzi");
        assert_eq!(doc.status, DocumentStatus::InProgress);

        // 8 generated + DOC-2024-0001; 12 generated + DOC-2024-0002
        let stats = store.dashboard().unwrap().stats;
        assert_eq!(stats.in_progress, 9);
        assert_eq!(stats.completed, 13);
    }

    #[test]
    fn fixed_documents_are_newest() {
        let store = SqliteDocumentStore::open_in_memory().unwrap();
        seed_sample_documents(&store, &mut StdRng::seed_from_u64(1)).unwrap();
        let page = store.list(&DocumentFilter::default()).unwrap();
        assert_eq!(page.data[0].register_number, "DOC-2024-0003");
        assert_eq!(page.last_page, 2);
    }

    #[test]
    fn seed_if_empty_skips_populated_store() {
        let store = SqliteDocumentStore::open_in_memory().unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(seed_if_empty(&store, &mut rng).unwrap(), Some(30));
        assert_eq!(seed_if_empty(&store, &mut rng).unwrap(), None);
        assert_eq!(store.count().unwrap(), 30);
    }

    #[test]
    fn generated_letters_are_valid_shape() {
        let mut rng = StdRng::seed_from_u64(11);
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let input = generated_document(&mut rng, today, DocumentStatus::Rejected);
        let number = input.register_number.unwrap();
        assert_eq!(number.len(), "DOC-0000-0000".len());
        assert!(number.starts_with("DOC-"));
        assert_eq!(input.status.as_deref(), Some("Ditolak"));
    }
}

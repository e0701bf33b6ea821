use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use base64::Engine as _;
use clap::{Parser, Subcommand};

use rollcall_core::attendance::domain::session::SubmissionSession;
use rollcall_core::backend::domain::group_directory::GroupDirectory;
use rollcall_core::backend::domain::person_registrar::Registration;
use rollcall_core::backend::infrastructure::http_backend::HttpBackend;
use rollcall_core::pipeline::commit_attendance_use_case::CommitAttendanceUseCase;
use rollcall_core::pipeline::mark_attendance_use_case::MarkAttendanceUseCase;
use rollcall_core::pipeline::register_person_use_case::RegisterPersonUseCase;
use rollcall_core::shared::constants::{DEFAULT_BACKEND_URL, IMAGE_EXTENSIONS};
use rollcall_core::shared::image_asset::ImageAsset;

/// Roster-backed attendance marking via a face-recognition backend.
#[derive(Parser)]
#[command(name = "rollcall")]
struct Cli {
    /// Base URL of the recognition backend.
    #[arg(long, default_value = DEFAULT_BACKEND_URL)]
    backend_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the known groups.
    Groups,

    /// Print the enrolled roster for a group.
    Roster {
        /// Group identifier.
        group: String,
    },

    /// Submit a photo batch, review the derived ledger, and commit it.
    Mark {
        /// Group identifier scoping the roster and recognition.
        #[arg(long)]
        group: String,

        /// Photos to submit, one detect request each.
        images: Vec<PathBuf>,

        /// Force these names present before committing.
        #[arg(long)]
        present: Vec<String>,

        /// Force these names absent before committing.
        #[arg(long)]
        absent: Vec<String>,

        /// Derive and print the ledger without committing it.
        #[arg(long)]
        dry_run: bool,

        /// Write the backend's annotated images into this directory.
        #[arg(long)]
        annotated_dir: Option<PathBuf>,
    },

    /// Enroll a person's face under a group.
    Register {
        /// Group identifier.
        #[arg(long)]
        group: String,

        /// Person's name as it should appear on the roster.
        #[arg(long)]
        name: String,

        /// 10-digit mobile number starting with 6-9.
        #[arg(long)]
        contact: String,

        /// Face photo.
        image: PathBuf,
    },
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let backend = HttpBackend::new(&cli.backend_url).map_err(|e| e.user_message())?;

    match cli.command {
        Command::Groups => run_groups(&backend),
        Command::Roster { group } => run_roster(&backend, &group),
        Command::Mark {
            group,
            images,
            present,
            absent,
            dry_run,
            annotated_dir,
        } => run_mark(
            backend,
            &group,
            &images,
            &present,
            &absent,
            dry_run,
            annotated_dir.as_deref(),
        ),
        Command::Register {
            group,
            name,
            contact,
            image,
        } => run_register(backend, group, name, contact, &image),
    }
}

/// Group listing is informational: a fetch failure is logged and yields an
/// empty listing, since the operator can still type a group name manually.
fn run_groups(backend: &HttpBackend) -> Result<(), Box<dyn std::error::Error>> {
    match backend.groups() {
        Ok(groups) => {
            for group in groups {
                println!("{group}");
            }
        }
        Err(e) => log::warn!("Could not fetch groups: {e}"),
    }
    Ok(())
}

fn run_roster(backend: &HttpBackend, group: &str) -> Result<(), Box<dyn std::error::Error>> {
    let roster = backend.roster(group).map_err(|e| e.user_message())?;
    for name in roster {
        println!("{name}");
    }
    Ok(())
}

fn run_mark(
    backend: HttpBackend,
    group: &str,
    images: &[PathBuf],
    present: &[String],
    absent: &[String],
    dry_run: bool,
    annotated_dir: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let assets = load_assets(images)?;

    let progress: Box<dyn Fn(usize, usize) + Send> = Box::new(|current, total| {
        eprint!("\rProcessing image {current}/{total}");
    });

    let use_case = MarkAttendanceUseCase::new(
        Box::new(backend.clone()),
        Box::new(backend.clone()),
        Some(progress),
    );
    let result = use_case.execute(&assets, group);
    // Terminate the \r progress line before anything else prints
    eprintln!();
    let session = result.map_err(|e| e.user_message())?;

    log::info!(
        "Identified {} name(s) across {} image(s)",
        session.outcome().identified_names().len(),
        assets.len()
    );

    if let Some(dir) = annotated_dir {
        write_annotated(dir, session.outcome().rendered_images());
    }

    // Operator overrides, keyed by exact roster name
    let mut session = session;
    for name in present {
        session = apply_override(session, name, true)?;
    }
    for name in absent {
        session = apply_override(session, name, false)?;
    }

    println!("Attendance for section {group}:");
    for record in session.ledger().records() {
        let mark = if record.present { "present" } else { "absent" };
        println!("  {:<28} {mark}", record.name);
    }
    println!(
        "{} of {} present",
        session.ledger().present_count(),
        session.ledger().len()
    );

    if dry_run {
        log::info!("Dry run: ledger not submitted");
        return Ok(());
    }

    let commit = CommitAttendanceUseCase::new(Box::new(backend));
    let receipt = commit.execute(&session).map_err(|e| e.user_message())?;
    println!("{}", receipt.confirmation());
    Ok(())
}

fn run_register(
    backend: HttpBackend,
    group: String,
    name: String,
    contact: String,
    image: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = Registration {
        image: ImageAsset::from_path(image)?,
        name,
        contact,
        group,
    };
    let use_case = RegisterPersonUseCase::new(Box::new(backend));
    let message = use_case.execute(&request).map_err(|e| e.user_message())?;
    println!(
        "{}",
        message.unwrap_or_else(|| "Person registered successfully!".to_string())
    );
    Ok(())
}

fn load_assets(images: &[PathBuf]) -> Result<Vec<ImageAsset>, Box<dyn std::error::Error>> {
    let mut assets = Vec::with_capacity(images.len());
    for path in images {
        if !is_image(path) {
            log::warn!("{} does not look like an image file", path.display());
        }
        assets.push(
            ImageAsset::from_path(path)
                .map_err(|e| format!("Could not read {}: {e}", path.display()))?,
        );
    }
    Ok(assets)
}

fn apply_override(
    session: SubmissionSession,
    name: &str,
    present: bool,
) -> Result<SubmissionSession, Box<dyn std::error::Error>> {
    let index = session
        .ledger()
        .position(name)
        .ok_or_else(|| format!("'{name}' is not on the roster for this group"))?;
    // position() guarantees the index is in range
    Ok(session.set_present(index, present).unwrap_or(session))
}

/// Decode the backend's annotated images to disk, returning how many were
/// actually written. Payloads are opaque to the attendance flow, so a bad
/// payload is a warning, never a failure.
fn write_annotated(dir: &Path, rendered: &[String]) -> usize {
    if let Err(e) = fs::create_dir_all(dir) {
        log::warn!("Could not create {}: {e}", dir.display());
        return 0;
    }
    let mut written = 0;
    for (i, payload) in rendered.iter().enumerate() {
        match base64::engine::general_purpose::STANDARD.decode(payload) {
            Ok(bytes) => {
                let path = dir.join(format!("annotated_{:03}.jpg", i + 1));
                match fs::write(&path, bytes) {
                    Ok(()) => written += 1,
                    Err(e) => log::warn!("Could not write {}: {e}", path.display()),
                }
            }
            Err(e) => log::warn!("Skipping annotated image {}: {e}", i + 1),
        }
    }
    log::info!("Wrote {written} annotated image(s) to {}", dir.display());
    written
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

use crate::cli::parser::StaffCommand;
use crate::config::Config;
use crate::core::assignment::AssignmentService;
use crate::core::staff::{StaffService, carried_rating, filter_staff, staff_stats};
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{StaffFilter, StaffInput, StaffMember};
use crate::ui::messages::{header, info, success};
use crate::ui::prompt::confirm;
use crate::utils::colors::{color_for_rating, color_for_staff_status, color_for_work_status, paint};
use crate::utils::date::parse_date;
use crate::utils::table::Table;
use crate::utils::{format_percent, truncate};
use chrono::{Local, NaiveDate};
use std::collections::HashMap;

fn join_date(raw: Option<&str>) -> AppResult<NaiveDate> {
    match raw {
        None => Ok(Local::now().date_naive()),
        Some(s) => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string())),
    }
}

fn print_roster(staff: &[StaffMember], workload: Option<&HashMap<String, (usize, usize, usize)>>) {
    let mut cols = vec!["ID", "NAME", "PHONE", "AREA", "STATUS", "JOINED", "COLLECTIONS", "RATING"];
    if workload.is_some() {
        cols.extend(["ASSIGNED", "DONE", "OPEN"]);
    }
    let mut table = Table::new(&cols);

    for m in staff {
        let mut row = vec![
            m.id.clone(),
            m.name.clone(),
            m.phone.clone(),
            truncate(&m.working_area, 30),
            paint(color_for_staff_status(m.status), m.status.as_str()),
            m.join_date.clone(),
            m.total_collections.to_string(),
            paint(color_for_rating(m.rating), &format!("{:.1}", m.rating)),
        ];
        if let Some(w) = workload {
            let (total, done, open) = w.get(&m.id).copied().unwrap_or_default();
            row.extend([total.to_string(), done.to_string(), open.to_string()]);
        }
        table.add_row(row);
    }

    print!("{}", table.render());
}

pub fn handle(cmd: &StaffCommand, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::open(&cfg.database)?;

    match cmd {
        StaffCommand::Add {
            name,
            phone,
            working_area,
            status,
            join_date: jd,
            total_collections,
            rating,
        } => {
            let input = StaffInput {
                name: name.trim().to_string(),
                phone: phone.clone(),
                working_area: working_area.clone(),
                status: *status,
                join_date: join_date(jd.as_deref())?,
                total_collections: *total_collections,
                rating: rating.unwrap_or(cfg.default_rating),
            };

            let id = StaffService::add(&pool, &input)?;
            audit_quiet(&pool.conn, "staff_add", &id, &format!("Added {}", input.name));
            success(format!("Staff member '{}' added with id {id}", input.name));
            println!("{id}");
        }

        StaffCommand::List {
            search,
            status,
            sort,
            order,
            workload,
        } => {
            let roster = StaffService::list(&pool, cfg.default_rating)?;
            let filter = StaffFilter {
                search: search.clone(),
                status: *status,
                sort_by: *sort,
                order: *order,
            };
            let shown = filter_staff(&roster, &filter);

            if shown.is_empty() {
                info("No staff members found.");
                return Ok(());
            }

            let counts = if *workload {
                Some(
                    AssignmentService::staff_with_assigned_work(&pool, cfg.default_rating)?
                        .into_iter()
                        .map(|w| (w.staff.id, (w.total_assigned, w.completed, w.pending)))
                        .collect::<HashMap<_, _>>(),
                )
            } else {
                None
            };

            header("Staff roster");
            print_roster(&shown, counts.as_ref());

            let stats = staff_stats(&roster);
            println!(
                "\n{} shown · {} total ({} active, {} on leave, {} inactive) · avg rating {:.1}",
                shown.len(),
                stats.total,
                stats.active,
                stats.on_leave,
                stats.inactive,
                stats.average_rating
            );
        }

        StaffCommand::Show { id } => {
            let m = StaffService::get(&pool, id, cfg.default_rating)?;
            let work = AssignmentService::assigned_work_for_staff(&pool, id)?;

            header(format!("{} ({})", m.name, m.id));
            println!("Phone        : {}", m.phone);
            println!("Working area : {}", m.working_area);
            println!("Status       : {}", paint(color_for_staff_status(m.status), m.status.as_str()));
            println!("Joined       : {}", m.join_date);
            println!("Last active  : {}", m.last_active);
            println!("Collections  : {}", m.total_collections);
            println!("Rating       : {:.1}", m.rating);
            println!();

            if work.is_empty() {
                info("No work assigned.");
                return Ok(());
            }

            let mut table = Table::new(&["DETECTION", "ASSIGNED", "ADDRESS", "CONFIDENCE", "STATUS"]);
            for w in &work {
                table.add_row(vec![
                    w.detection_id.clone(),
                    w.assigned_at.clone(),
                    truncate(&w.address, 48),
                    format_percent(w.confidence_score),
                    paint(color_for_work_status(w.status), w.status.as_str()),
                ]);
            }
            print!("{}", table.render());
        }

        StaffCommand::Update {
            id,
            name,
            phone,
            working_area,
            status,
            join_date: jd,
            total_collections,
            rating,
        } => {
            let current = StaffService::get(&pool, id, cfg.default_rating)?;

            let join = match jd {
                Some(s) => join_date(Some(s))?,
                // stored dates may be missing or malformed
                None => parse_date(&current.join_date).unwrap_or_else(|| Local::now().date_naive()),
            };

            let input = StaffInput {
                name: name.clone().unwrap_or(current.name),
                phone: phone.clone().unwrap_or(current.phone),
                working_area: working_area.clone().unwrap_or(current.working_area),
                status: status.unwrap_or(current.status),
                join_date: join,
                total_collections: total_collections.unwrap_or(current.total_collections),
                rating: rating.unwrap_or(carried_rating(current.rating)),
            };

            StaffService::update(&pool, id, &input)?;
            audit_quiet(&pool.conn, "staff_edit", id, &format!("Updated {}", input.name));
            success(format!("Staff member {id} updated."));
        }

        StaffCommand::Del { id, yes } => {
            let m = StaffService::get(&pool, id, cfg.default_rating)?;

            let prompt = format!(
                "Delete staff member '{}' ({})? Work assigned to them stays assigned.",
                m.name, m.id
            );
            if !*yes && !confirm(&prompt)? {
                info("Operation cancelled.");
                return Ok(());
            }

            StaffService::delete(&pool, id)?;
            audit_quiet(&pool.conn, "staff_del", id, &format!("Deleted {}", m.name));
            success(format!("Staff member '{}' deleted.", m.name));
        }
    }

    Ok(())
}

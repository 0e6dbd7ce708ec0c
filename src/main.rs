use chrono::NaiveDate;
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use resource_planner::{
    AppState,
    config::Config,
    engine::{self, Warning},
    error::{AppError, AppResult},
    init_tracing,
    models::{LeaveType, ProjectType},
    services::{
        AllocationsService, DashboardService, LeavesService, ProjectsService, RequestContext,
        allocations_service::{AllocationEntry, AllocationRequest},
    },
    utils::{employee_name, project_name},
    validation::{LeaveForm, ProjectForm},
};
use serde::Serialize;
use std::process::ExitCode;
use tracing::error;

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("{}: expected YYYY-MM-DD", e))
}

/// `EMPLOYEE_ID:HOURS[:TASKS[:PRODUCTIVITY]]`
fn parse_entry(s: &str) -> Result<AllocationEntry, String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() < 2 || parts.len() > 4 {
        return Err("expected EMPLOYEE_ID:HOURS[:TASKS[:PRODUCTIVITY]]".to_string());
    }
    let number_err = |field: &str| format!("invalid {} in '{}'", field, s);

    Ok(AllocationEntry {
        employee_id: parts[0].parse().map_err(|_| number_err("employee id"))?,
        weekly_hours_allocated: parts[1].parse().map_err(|_| number_err("hours"))?,
        weekly_tasks_allocated: match parts.get(2) {
            Some(tasks) => tasks.parse().map_err(|_| number_err("tasks"))?,
            None => 0,
        },
        productivity_override: match parts.get(3) {
            Some(p) => Some(p.parse().map_err(|_| number_err("productivity"))?),
            None => None,
        },
    })
}

fn id_arg(name: &'static str) -> Arg {
    Arg::new(name)
        .required(true)
        .value_parser(value_parser!(i64))
}

fn date_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_name("YYYY-MM-DD")
        .help(help)
        .value_parser(parse_date)
}

fn cli() -> Command {
    Command::new("resource-planner")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Plan project staffing, allocations and leaves against the planning backend")
        .subcommand_required(true)
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .help("Print results as JSON")
                .action(ArgAction::SetTrue),
        )
        .subcommand(Command::new("dashboard").about("Totals plus active and upcoming leaves"))
        .subcommand(
            Command::new("projects")
                .about("Manage projects")
                .subcommand_required(true)
                .subcommand(
                    Command::new("list").arg(
                        Arg::new("type")
                            .long("type")
                            .help("PoC, Full or Side")
                            .value_parser(|s: &str| s.parse::<ProjectType>()),
                    ),
                )
                .subcommand(
                    Command::new("show")
                        .about("Requirements and allocation status of a project")
                        .arg(id_arg("id")),
                )
                .subcommand(
                    Command::new("create")
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("client").long("client"))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(|s: &str| s.parse::<ProjectType>()),
                        )
                        .arg(
                            Arg::new("total-tasks")
                                .long("total-tasks")
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("time-per-task")
                                .long("time-per-task")
                                .help("Estimated hours per task")
                                .value_parser(value_parser!(f64)),
                        )
                        .arg(
                            Arg::new("weekly-target")
                                .long("weekly-target")
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(date_arg("sla", "SLA deadline"))
                        .arg(date_arg("start", "Start date"))
                        .arg(date_arg("end", "End date"))
                        .arg(
                            Arg::new("skill")
                                .long("skill")
                                .help("Required expertise, repeatable")
                                .action(ArgAction::Append),
                        )
                        .arg(Arg::new("priority").long("priority")),
                )
                .subcommand(Command::new("delete").arg(id_arg("id"))),
        )
        .subcommand(
            Command::new("employees")
                .about("Browse employees")
                .subcommand_required(true)
                .subcommand(
                    Command::new("list")
                        .arg(
                            Arg::new("skill")
                                .long("skill")
                                .help("Only employees with every given skill")
                                .action(ArgAction::Append),
                        )
                        .arg(date_arg("available-on", "Only employees not on leave that day")),
                ),
        )
        .subcommand(
            Command::new("allocations")
                .about("Browse and remove allocations")
                .subcommand_required(true)
                .subcommand(
                    Command::new("list")
                        .arg(
                            Arg::new("project")
                                .long("project")
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("employee")
                                .long("employee")
                                .value_parser(value_parser!(i64)),
                        ),
                )
                .subcommand(Command::new("delete").arg(id_arg("id"))),
        )
        .subcommand(
            Command::new("allocate")
                .about("Allocate employees to a project, showing warnings first")
                .arg(
                    Arg::new("project")
                        .long("project")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(
                    Arg::new("entry")
                        .long("entry")
                        .short('e')
                        .value_name("EMPLOYEE_ID:HOURS[:TASKS[:PRODUCTIVITY]]")
                        .required(true)
                        .action(ArgAction::Append)
                        .value_parser(parse_entry),
                )
                .arg(date_arg("week", "Effective week, defaults to today"))
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .help("Only show the preview")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("leaves")
                .about("Manage leaves")
                .subcommand_required(true)
                .subcommand(
                    Command::new("list").arg(
                        Arg::new("employee")
                            .long("employee")
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(
                    Command::new("create")
                        .arg(
                            Arg::new("employee")
                                .long("employee")
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(date_arg("start", "First day of leave"))
                        .arg(date_arg("end", "Last day of leave"))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .help("casual, sick, vacation, personal or emergency")
                                .value_parser(|s: &str| s.parse::<LeaveType>()),
                        ),
                )
                .subcommand(Command::new("delete").arg(id_arg("id")))
                .subcommand(Command::new("impact").arg(id_arg("id"))),
        )
}

#[tokio::main]
async fn main() -> ExitCode {
    let matches = cli().get_matches();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config);

    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to initialize client");
            eprintln!("Error: {}", e.user_message());
            return ExitCode::FAILURE;
        }
    };
    let ctx = RequestContext::now();

    match run(&state, &ctx, &matches).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Validation { errors }) => {
            eprintln!("Please fix the following:");
            for (field, message) in errors {
                eprintln!("  {}: {}", field, message);
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(state: &AppState, ctx: &RequestContext, matches: &ArgMatches) -> AppResult<()> {
    let json = matches.get_flag("json");

    match matches.subcommand() {
        Some(("dashboard", _)) => {
            let summary = DashboardService::summary(state, ctx).await?;
            if json {
                return print_json(&summary);
            }
            let employees = state.employees.list().await?;
            println!("Projects:     {} ({} active)", summary.total_projects, summary.active_projects);
            println!("Employees:    {}", summary.total_employees);
            println!("Allocations:  {}", summary.total_allocations);
            println!("On leave today:");
            for leave in &summary.active_leaves {
                println!(
                    "  {} ({}, until {})",
                    employee_name(&employees, leave.employee_id),
                    leave.leave_type.label(),
                    leave.end_date
                );
            }
            println!("Upcoming leaves:");
            for leave in &summary.upcoming_leaves {
                println!(
                    "  {} ({}, {} to {})",
                    employee_name(&employees, leave.employee_id),
                    leave.leave_type.label(),
                    leave.start_date,
                    leave.end_date
                );
            }
        }
        Some(("projects", sub)) => run_projects(state, ctx, sub, json).await?,
        Some(("employees", sub)) => {
            if let Some(("list", args)) = sub.subcommand() {
                let skills: Vec<String> = args
                    .get_many::<String>("skill")
                    .map(|v| v.cloned().collect())
                    .unwrap_or_default();
                let mut employees = state.employees.filter_by_skills(skills.as_slice()).await?;
                if let Some(date) = args.get_one::<NaiveDate>("available-on") {
                    let leaves = state.leaves.list().await?;
                    let available = state.employees.available_on(&leaves, *date).await?;
                    employees.retain(|e| available.iter().any(|a| a.id == e.id));
                }
                if json {
                    return print_json(&employees);
                }
                let allocations = state.allocations.list().await?;
                for employee in &employees {
                    let metrics = engine::employee_metrics(employee, &allocations);
                    println!(
                        "#{:<4} {:<24} {:<10} {:>5.1}/{:>4.1}h  {}",
                        employee.id,
                        employee.name,
                        employee.work_type,
                        metrics.allocated_hours,
                        metrics.available_hours,
                        employee.skills.join(", ")
                    );
                }
            }
        }
        Some(("allocations", sub)) => match sub.subcommand() {
            Some(("list", args)) => {
                let allocations = match (
                    args.get_one::<i64>("project"),
                    args.get_one::<i64>("employee"),
                ) {
                    (Some(project_id), _) => state.allocations.by_project(*project_id).await?,
                    (None, Some(employee_id)) => {
                        state.allocations.by_employee(*employee_id).await?
                    }
                    (None, None) => state.allocations.list().await?.to_vec(),
                };
                if json {
                    return print_json(&allocations);
                }
                let projects = state.projects.list().await?;
                let employees = state.employees.list().await?;
                for a in &allocations {
                    println!(
                        "#{:<4} {:<24} -> {:<24} {:>5.1}h/week {:>4} tasks  week of {}",
                        a.id,
                        employee_name(&employees, a.employee_id),
                        project_name(&projects, a.project_id),
                        a.weekly_hours_allocated,
                        a.weekly_tasks_allocated,
                        a.effective_week
                    );
                }
            }
            Some(("delete", args)) => {
                let id = *required::<i64>(args, "id")?;
                AllocationsService::delete(state, id).await?;
                println!("Allocation {} deleted", id);
            }
            _ => {}
        },
        Some(("allocate", args)) => {
            let request = AllocationRequest {
                project_id: *required::<i64>(args, "project")?,
                effective_week: args.get_one::<NaiveDate>("week").copied(),
                entries: args
                    .get_many::<AllocationEntry>("entry")
                    .map(|v| v.cloned().collect())
                    .unwrap_or_default(),
            };

            let preview = AllocationsService::preview(state, ctx, &request).await?;
            if json && args.get_flag("dry-run") {
                return print_json(&preview);
            }
            println!("Allocating to {}", preview.project_name);
            for employee in &preview.employees {
                println!(
                    "  {} ({:.1}h of {:.1}h already allocated)",
                    employee.employee_name,
                    employee.metrics.allocated_hours,
                    employee.metrics.available_hours
                );
                print_warnings(&employee.warnings, "    ");
            }
            if let Some(warning) = &preview.project_warning {
                print_warnings(std::slice::from_ref(warning), "  ");
            }
            if args.get_flag("dry-run") {
                return Ok(());
            }

            let created = AllocationsService::create(state, ctx, &request).await?;
            if json {
                return print_json(&created);
            }
            println!("Created {} allocation(s)", created.len());
        }
        Some(("leaves", sub)) => run_leaves(state, ctx, sub, json).await?,
        _ => {}
    }
    Ok(())
}

async fn run_projects(
    state: &AppState,
    ctx: &RequestContext,
    matches: &ArgMatches,
    json: bool,
) -> AppResult<()> {
    match matches.subcommand() {
        Some(("list", args)) => {
            let projects =
                ProjectsService::list(state, args.get_one::<ProjectType>("type").copied()).await?;
            if json {
                return print_json(&projects);
            }
            for p in &projects {
                println!(
                    "#{:<4} {:<28} {:<16} {:<5} {} to {}  [{}]",
                    p.id, p.name, p.client, p.project_type, p.start_date, p.end_date, p.project_status
                );
            }
        }
        Some(("show", args)) => {
            let report = ProjectsService::report(state, *required::<i64>(args, "id")?).await?;
            if json {
                return print_json(&report);
            }
            let p = &report.project;
            println!("{} ({}, {})", p.name, p.client, p.project_type);
            println!("  {} to {}", p.start_date, p.end_date);
            println!(
                "  {} tasks x {}h = {:.1}h over {} week(s), {:.2}h/week",
                p.total_tasks,
                p.estimated_time_per_task,
                report.requirements.required_hours,
                report.requirements.duration_weeks,
                report.requirements.weekly_required_hours
            );
            if !p.required_expertise.is_empty() {
                println!("  Skills: {}", p.required_expertise.join(", "));
            }
            let employees = state.employees.list().await?;
            for a in &report.allocations {
                println!(
                    "  - {} {:.1}h/week",
                    employee_name(&employees, a.employee_id),
                    a.weekly_hours_allocated
                );
            }
            if let Some(warning) = &report.warning {
                print_warnings(std::slice::from_ref(warning), "  ");
            }
        }
        Some(("create", args)) => {
            let form = ProjectForm {
                name: args.get_one::<String>("name").cloned().unwrap_or_default(),
                client: args.get_one::<String>("client").cloned().unwrap_or_default(),
                project_type: args.get_one::<ProjectType>("type").copied(),
                total_tasks: args.get_one::<i64>("total-tasks").copied(),
                sla_deadline: args.get_one::<NaiveDate>("sla").copied(),
                required_expertise: args
                    .get_many::<String>("skill")
                    .map(|v| v.cloned().collect())
                    .unwrap_or_default(),
                estimated_time_per_task: args.get_one::<f64>("time-per-task").copied(),
                weekly_target: args.get_one::<i64>("weekly-target").copied(),
                start_date: args.get_one::<NaiveDate>("start").copied(),
                end_date: args.get_one::<NaiveDate>("end").copied(),
                priority: args.get_one::<String>("priority").cloned(),
            };
            let project = ProjectsService::create(state, ctx, form).await?;
            if json {
                return print_json(&project);
            }
            println!("Created project #{} {}", project.id, project.name);
        }
        Some(("delete", args)) => {
            let id = *required::<i64>(args, "id")?;
            ProjectsService::delete(state, id).await?;
            println!("Project {} deleted", id);
        }
        _ => {}
    }
    Ok(())
}

async fn run_leaves(
    state: &AppState,
    ctx: &RequestContext,
    matches: &ArgMatches,
    json: bool,
) -> AppResult<()> {
    match matches.subcommand() {
        Some(("list", args)) => {
            let leaves = LeavesService::list(state, args.get_one::<i64>("employee").copied()).await?;
            if json {
                return print_json(&leaves);
            }
            let employees = state.employees.list().await?;
            for leave in &leaves {
                println!(
                    "#{:<4} {:<24} {:<16} {} to {}",
                    leave.id,
                    employee_name(&employees, leave.employee_id),
                    leave.leave_type.label(),
                    leave.start_date,
                    leave.end_date
                );
            }
        }
        Some(("create", args)) => {
            let form = LeaveForm {
                employee_id: args.get_one::<i64>("employee").copied(),
                start_date: args.get_one::<NaiveDate>("start").copied(),
                end_date: args.get_one::<NaiveDate>("end").copied(),
                leave_type: args.get_one::<LeaveType>("type").copied(),
            };
            let leave = LeavesService::create(state, ctx, form).await?;
            let impact = LeavesService::impact_of(state, &leave).await?;
            if json {
                return print_json(&serde_json::json!({ "leave": leave, "impact": impact }));
            }
            println!("Created leave #{}", leave.id);
            print_warnings(&impact.warnings, "  ");
        }
        Some(("delete", args)) => {
            let id = *required::<i64>(args, "id")?;
            LeavesService::delete(state, id).await?;
            println!("Leave {} deleted", id);
        }
        Some(("impact", args)) => {
            let impact = LeavesService::impact(state, *required::<i64>(args, "id")?).await?;
            if json {
                return print_json(&impact);
            }
            if impact.affected_projects.is_empty() {
                println!("No allocated projects affected");
            }
            for project in &impact.affected_projects {
                println!("  #{} {}", project.project_id, project.project_name);
            }
            print_warnings(&impact.warnings, "  ");
        }
        _ => {}
    }
    Ok(())
}

fn required<'a, T: Clone + Send + Sync + 'static>(
    args: &'a ArgMatches,
    name: &str,
) -> AppResult<&'a T> {
    args.get_one::<T>(name)
        .ok_or_else(|| AppError::internal(format!("missing argument: {}", name)))
}

fn print_warnings(warnings: &[Warning], indent: &str) {
    for warning in warnings {
        println!(
            "{}[{}] {}",
            indent,
            warning.severity.to_string().to_uppercase(),
            warning.message
        );
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

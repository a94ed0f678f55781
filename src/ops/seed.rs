//! Built-in mock data: the initial user list, tasks, and market widgets.

use chrono::{DateTime, NaiveDate, Utc};

use crate::model::{
    AlertKind, Company, InventoryItem, Kpi, MarketAlert, Preferences, Priority, Role, StockPoint,
    Task, TaskStatus, TaskTag, Trend, User, WatchlistItem,
};

/// Default count of procedurally generated companies in the search index
pub const GENERATED_COMPANIES: usize = 200;

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap_or_default()
}

fn midnight(month: u32, day: u32) -> DateTime<Utc> {
    date(month, day).and_hms_opt(0, 0, 0).unwrap_or_default().and_utc()
}

#[allow(clippy::too_many_arguments)]
fn user(
    n: u32,
    username: &str,
    password: &str,
    role: Role,
    name: &str,
    email: &str,
    avatar: &str,
    advanced_metrics: bool,
    created: (u32, u32),
    last_login: (u32, u32),
) -> User {
    User {
        id: format!("user-{}", n),
        username: username.to_string(),
        password: Some(password.to_string()),
        role,
        name: name.to_string(),
        email: email.to_string(),
        phone: format!("+1-555-010{}", n),
        avatar: avatar.to_string(),
        preferences: Preferences {
            advanced_metrics,
            ..Default::default()
        },
        created_at: midnight(created.0, created.1),
        last_login: Some(midnight(last_login.0, last_login.1)),
    }
}

pub fn users() -> Vec<User> {
    vec![
        user(
            1,
            "admin@example.com",
            "admin123",
            Role::Admin,
            "Sarah Anderson",
            "sarah.anderson@enterprise.com",
            "SA",
            true,
            (1, 1),
            (1, 15),
        ),
        user(
            2,
            "user@example.com",
            "user123",
            Role::User,
            "Michael Chen",
            "michael.chen@enterprise.com",
            "MC",
            false,
            (1, 5),
            (1, 16),
        ),
        user(
            3,
            "sales@example.com",
            "sales123",
            Role::Sales,
            "Jessica Rivera",
            "jessica.rivera@enterprise.com",
            "JR",
            false,
            (1, 10),
            (1, 14),
        ),
    ]
}

struct TaskSeed {
    title: &'static str,
    description: &'static str,
    status: TaskStatus,
    tag: TaskTag,
    priority: Priority,
    owner: Role,
    assignee: &'static str,
    created: (u32, u32),
    due: (u32, u32),
}

const TASKS: [TaskSeed; 10] = [
    TaskSeed {
        title: "Complete Q1 Budget Review",
        description: "Review and finalize all Q1 budget allocations across departments",
        status: TaskStatus::InProgress,
        tag: TaskTag::Admin,
        priority: Priority::High,
        owner: Role::Admin,
        assignee: "user-1",
        created: (1, 10),
        due: (2, 1),
    },
    TaskSeed {
        title: "Update User Documentation",
        description: "Revise API documentation with latest endpoints and authentication methods",
        status: TaskStatus::ToDo,
        tag: TaskTag::General,
        priority: Priority::Medium,
        owner: Role::User,
        assignee: "user-2",
        created: (1, 12),
        due: (2, 5),
    },
    TaskSeed {
        title: "Contact Top 10 Leads",
        description: "Reach out to qualified leads for initial product demonstration",
        status: TaskStatus::Backlog,
        tag: TaskTag::Sales,
        priority: Priority::High,
        owner: Role::Sales,
        assignee: "user-3",
        created: (1, 8),
        due: (1, 25),
    },
    TaskSeed {
        title: "Review System Permissions",
        description: "Audit and update user access levels across all modules",
        status: TaskStatus::ToDo,
        tag: TaskTag::Admin,
        priority: Priority::High,
        owner: Role::Admin,
        assignee: "user-1",
        created: (1, 13),
        due: (2, 3),
    },
    TaskSeed {
        title: "Quarterly Sales Report",
        description: "Compile and analyze sales performance metrics for Q4 2023",
        status: TaskStatus::InProgress,
        tag: TaskTag::Sales,
        priority: Priority::High,
        owner: Role::Sales,
        assignee: "user-3",
        created: (1, 11),
        due: (1, 31),
    },
    TaskSeed {
        title: "Feature Implementation Sprint",
        description: "Complete development tasks for the new dashboard widgets module",
        status: TaskStatus::InProgress,
        tag: TaskTag::General,
        priority: Priority::Medium,
        owner: Role::User,
        assignee: "user-2",
        created: (1, 9),
        due: (2, 8),
    },
    TaskSeed {
        title: "Database Performance Optimization",
        description: "Optimize slow queries and implement caching strategies",
        status: TaskStatus::ToDo,
        tag: TaskTag::General,
        priority: Priority::Medium,
        owner: Role::User,
        assignee: "user-2",
        created: (1, 14),
        due: (2, 10),
    },
    TaskSeed {
        title: "Client Onboarding Process",
        description: "Define and document the new client onboarding workflow",
        status: TaskStatus::Backlog,
        tag: TaskTag::Sales,
        priority: Priority::Medium,
        owner: Role::Sales,
        assignee: "user-3",
        created: (1, 7),
        due: (2, 15),
    },
    TaskSeed {
        title: "Implement Error Logging",
        description: "Set up comprehensive error logging and monitoring system",
        status: TaskStatus::Done,
        tag: TaskTag::Admin,
        priority: Priority::High,
        owner: Role::Admin,
        assignee: "user-1",
        created: (1, 5),
        due: (1, 20),
    },
    TaskSeed {
        title: "Enterprise License Renewal",
        description: "Process annual software license renewals and budget allocation",
        status: TaskStatus::Done,
        tag: TaskTag::Admin,
        priority: Priority::High,
        owner: Role::Admin,
        assignee: "user-1",
        created: (1, 1),
        due: (1, 15),
    },
];

pub fn tasks() -> Vec<Task> {
    TASKS
        .iter()
        .enumerate()
        .map(|(i, t)| Task {
            id: format!("task-{}", i + 1),
            title: t.title.to_string(),
            description: t.description.to_string(),
            status: t.status,
            tag: t.tag,
            priority: t.priority,
            owner_role: t.owner,
            assigned_user: t.assignee.to_string(),
            created_at: midnight(t.created.0, t.created.1),
            due_date: Some(date(t.due.0, t.due.1)),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Market widgets
// ---------------------------------------------------------------------------

pub fn kpis() -> Vec<Kpi> {
    let kpi = |id: &str, label: &str, value: &str, change: f64, status: Trend, trend: [u64; 6]| Kpi {
        id: id.to_string(),
        label: label.to_string(),
        value: value.to_string(),
        change,
        status,
        trend: trend.to_vec(),
    };
    vec![
        kpi(
            "sp500",
            "S&P 500",
            "4,604.37",
            0.85,
            Trend::Positive,
            [4500, 4520, 4510, 4550, 4580, 4604],
        ),
        kpi(
            "nasdaq",
            "Nasdaq 100",
            "16,085.11",
            1.2,
            Trend::Positive,
            [15800, 15900, 15850, 16000, 16050, 16085],
        ),
        kpi(
            "dow",
            "Dow Jones",
            "36,245.50",
            -0.15,
            Trend::Neutral,
            [36100, 36200, 36300, 36150, 36200, 36245],
        ),
        kpi(
            "russell",
            "Russell 2000",
            "1,880.82",
            -0.45,
            Trend::Negative,
            [1900, 1890, 1895, 1885, 1875, 1880],
        ),
    ]
}

/// Intraday history. The last two points are forecast-only.
pub fn stock_history() -> Vec<StockPoint> {
    let actual = [
        ("10:00", 180.50),
        ("11:00", 182.20),
        ("12:00", 181.80),
        ("13:00", 183.10),
        ("14:00", 184.50),
        ("15:00", 185.00),
        ("16:00", 185.90),
    ];
    let mut points: Vec<StockPoint> = actual
        .iter()
        .map(|&(name, v)| StockPoint {
            name: name.to_string(),
            value: Some(v),
            prediction: v,
        })
        .collect();
    for (name, p) in [("17:00 (F)", 186.50), ("18:00 (F)", 187.20)] {
        points.push(StockPoint {
            name: name.to_string(),
            value: None,
            prediction: p,
        });
    }
    points
}

pub fn watchlist() -> Vec<WatchlistItem> {
    [
        ("AAPL", "Apple Inc.", "185.90", "+1.5%", "High Conf."),
        ("TSLA", "Tesla, Inc.", "240.30", "-0.8%", "Med Conf."),
        ("NVDA", "NVIDIA Corp", "475.00", "+2.3%", "High Conf."),
        ("AMZN", "Amazon.com", "145.20", "+0.5%", "Med Conf."),
        ("GOOGL", "Alphabet Inc", "135.50", "-0.2%", "Low Conf."),
    ]
    .iter()
    .zip(1..)
    .map(|(&(symbol, company, price, change, confidence), id)| WatchlistItem {
        id,
        symbol: symbol.to_string(),
        company: company.to_string(),
        price: price.to_string(),
        change: change.to_string(),
        confidence: confidence.to_string(),
    })
    .collect()
}

pub fn market_alerts() -> Vec<MarketAlert> {
    vec![
        MarketAlert {
            id: 1,
            kind: AlertKind::Critical,
            message: "AAPL crossing all-time high predicted in next 4 hours.".to_string(),
        },
        MarketAlert {
            id: 2,
            kind: AlertKind::Warning,
            message: "Tech sector showing slight bearish divergence.".to_string(),
        },
        MarketAlert {
            id: 3,
            kind: AlertKind::Info,
            message: "Fed meeting minutes released at 2:00 PM EST.".to_string(),
        },
    ]
}

pub fn inventory() -> Vec<InventoryItem> {
    [
        ("Server Rack Units", "Hardware", 48, 20),
        ("Network Switches", "Hardware", 14, 12),
        ("Laptop Docks", "Peripherals", 9, 15),
        ("Software Licenses", "Software", 5, 25),
        ("Backup Drives", "Storage", 0, 10),
        ("Office Monitors", "Peripherals", 62, 30),
    ]
    .iter()
    .zip(1..)
    .map(|(&(item, category, stock, reorder_level), id)| InventoryItem {
        id,
        item: item.to_string(),
        category: category.to_string(),
        stock,
        reorder_level,
    })
    .collect()
}

const SECTORS: [&str; 6] = [
    "Technology",
    "Healthcare",
    "Finance",
    "Energy",
    "Consumer",
    "Industrial",
];
const SUFFIXES: [&str; 6] = ["Inc", "Corp", "Ltd", "Group", "Holdings", "Systems"];

/// The ten named companies followed by `generated` synthetic ones.
///
/// Synthetic entries come from a fixed-seed generator so the list is
/// identical on every run.
pub fn companies(generated: usize) -> Vec<Company> {
    let mut list: Vec<Company> = [
        ("AAPL", "Apple Inc.", 185.90, 1.5, "Technology"),
        ("MSFT", "Microsoft Corp.", 370.20, 0.8, "Technology"),
        ("GOOGL", "Alphabet Inc.", 135.50, -0.2, "Technology"),
        ("AMZN", "Amazon.com", 145.20, 0.5, "Consumer"),
        ("NVDA", "NVIDIA Corp", 475.00, 2.3, "Technology"),
        ("TSLA", "Tesla, Inc.", 240.30, -0.8, "Consumer"),
        ("META", "Meta Platforms", 330.10, 1.1, "Technology"),
        ("BRK.B", "Berkshire Hathaway", 360.50, 0.1, "Finance"),
        ("LLY", "Eli Lilly", 590.20, 1.8, "Healthcare"),
        ("V", "Visa Inc.", 250.80, 0.4, "Finance"),
    ]
    .iter()
    .map(|&(symbol, name, price, change, sector)| Company {
        symbol: symbol.to_string(),
        name: name.to_string(),
        price,
        change,
        sector: sector.to_string(),
    })
    .collect();

    let mut rng = Lcg(0x2545_F491_4F6C_DD1D);
    for _ in 0..generated {
        let sector = SECTORS[rng.below(SECTORS.len() as u64) as usize];
        let suffix = SUFFIXES[rng.below(SUFFIXES.len() as u64) as usize];
        let symbol: String = (0..3)
            .map(|_| char::from(b'A' + rng.below(26) as u8))
            .collect();
        // cents, 10.00..=509.99 and -5.00..=4.99
        let price = (1000 + rng.below(50_000)) as f64 / 100.0;
        let change = (rng.below(1000) as f64 - 500.0) / 100.0;
        list.push(Company {
            name: format!("{} {} {}", symbol, sector, suffix),
            symbol,
            price,
            change,
            sector: sector.to_string(),
        });
    }
    list
}

/// Knuth MMIX linear congruential generator
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

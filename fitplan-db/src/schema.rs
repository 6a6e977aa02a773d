pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS profiles (
    user_id TEXT PRIMARY KEY NOT NULL,
    weight_kg REAL NOT NULL,
    height_cm REAL NOT NULL,
    age INTEGER NOT NULL,
    sex TEXT NOT NULL,
    activity_level TEXT NOT NULL,
    goal TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS plan_variants (
    user_id TEXT NOT NULL REFERENCES profiles (user_id) ON DELETE CASCADE,
    goal TEXT NOT NULL,
    calories_daily INTEGER NOT NULL,
    protein_g INTEGER NOT NULL,
    carbs_g INTEGER NOT NULL,
    fats_g INTEGER NOT NULL,
    PRIMARY KEY (user_id, goal)
);

CREATE TABLE IF NOT EXISTS weight_log (
    user_id TEXT NOT NULL,
    logged_on TEXT NOT NULL,
    weight_kg REAL NOT NULL,
    PRIMARY KEY (user_id, logged_on)
);

CREATE TABLE IF NOT EXISTS food_log (
    id TEXT PRIMARY KEY NOT NULL,
    user_id TEXT NOT NULL,
    logged_on TEXT NOT NULL,
    name TEXT NOT NULL,
    calories REAL NOT NULL,
    protein_g REAL NOT NULL,
    carbs_g REAL NOT NULL,
    fats_g REAL NOT NULL
);

CREATE INDEX IF NOT EXISTS food_log_user_day ON food_log (user_id, logged_on);

CREATE TABLE IF NOT EXISTS subscriptions (
    user_id TEXT PRIMARY KEY NOT NULL,
    status TEXT NOT NULL,
    expires_at TEXT
);
";

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::domain::product::ProductDetails;
use crate::domain::sizing::BatteryFormula;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    /// Log diagnostics at debug level (overrides SOLAR_SIZER_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Size a system from hand-entered parameters
    Size(SizeArgs),
    /// Size a system with 550 W modules at 80 % efficiency
    Quick(QuickArgs),
    /// Size a system from a YAML request and write a YAML report
    SizeFile {
        /// Sizing request YAML file
        #[arg(short, long)]
        input: String,
        /// Output YAML file
        #[arg(short, long)]
        output: String,
    },
    /// Manage the product catalog
    Catalog {
        /// JSON file holding the catalog
        #[arg(short, long, default_value = "products.json")]
        store: String,
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Values every calculator asks for.
#[derive(Args, Debug, Clone)]
pub struct SiteArgs {
    /// Monthly consumption in kWh
    #[arg(short, long, allow_negative_numbers = true)]
    pub monthly_consumption: f64,
    /// Average daily peak sun hours at the site
    #[arg(short, long, allow_negative_numbers = true)]
    pub sun_hours: f64,
    /// Peak simultaneous load in kW, used to size the inverter
    #[arg(short, long, allow_negative_numbers = true)]
    pub peak_power: Option<f64>,
    /// Also write the report as YAML to this file
    #[arg(short, long)]
    pub output: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct SizeArgs {
    #[command(flatten)]
    pub site: SiteArgs,
    /// Module rating in W [default: 400]
    #[arg(short = 'w', long, allow_negative_numbers = true)]
    pub module_wattage: Option<f64>,
    /// System losses in percent [default: 15]
    #[arg(short, long, allow_negative_numbers = true)]
    pub losses: Option<f64>,
    /// Backup duration in days [default: 2]
    #[arg(long, conflicts_with = "autonomy_hours", allow_negative_numbers = true)]
    pub autonomy_days: Option<f64>,
    /// Backup duration in hours
    #[arg(long, allow_negative_numbers = true)]
    pub autonomy_hours: Option<f64>,
    /// Inverter headroom factor [default: 1.2]
    #[arg(long, allow_negative_numbers = true)]
    pub safety_margin: Option<f64>,
    /// Usable fraction of battery capacity [default: 0.9]
    #[arg(long, allow_negative_numbers = true)]
    pub depth_of_discharge: Option<f64>,
    /// Battery sizing formula
    #[arg(long, value_enum, default_value_t = BatteryFormula::DepthOfDischarge)]
    pub battery_formula: BatteryFormula,
}

#[derive(Args, Debug, Clone)]
pub struct QuickArgs {
    #[command(flatten)]
    pub site: SiteArgs,
    /// Backup duration in hours [default: 4]
    #[arg(long, allow_negative_numbers = true)]
    pub autonomy_hours: Option<f64>,
    /// Monthly electricity bill, adds an annual savings estimate
    #[arg(short = 'b', long, allow_negative_numbers = true)]
    pub monthly_bill: Option<f64>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CatalogAction {
    /// List all products
    List,
    /// Print one product as YAML
    Show { id: u32 },
    /// Add a product
    Add(ProductFields),
    /// Change fields of an existing product
    Update {
        id: u32,
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Remove a product
    Remove { id: u32 },
    /// Restore the default products
    Reset,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ProductFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub name_en: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub description_en: Option<String>,
    #[arg(long)]
    pub price: Option<String>,
    #[arg(long)]
    pub image: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub category_en: Option<String>,
    #[arg(long)]
    pub brand: Option<String>,
}

impl ProductFields {
    /// Overwrites only the fields that were given on the command line.
    pub fn apply_to(self, details: &mut ProductDetails) {
        let pairs = [
            (self.name, &mut details.name),
            (self.name_en, &mut details.name_en),
            (self.description, &mut details.description),
            (self.description_en, &mut details.description_en),
            (self.price, &mut details.price),
            (self.image, &mut details.image),
            (self.category, &mut details.category),
            (self.category_en, &mut details.category_en),
            (self.brand, &mut details.brand),
        ];
        for (value, target) in pairs {
            if let Some(value) = value {
                *target = value;
            }
        }
    }
}

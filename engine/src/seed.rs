//! Demo content seeded into an empty substrate on first start.
//!
//! Seeding goes through [`CollectionStore::init_collection`], so a collection
//! the user has already edited (or emptied) is never overwritten.

use crate::collection::CollectionStore;
use crate::domain::{
    Driver, DriverStatus, Employee, Order, OrderStatus, Part, Supplier, Truck, TruckStatus,
};
use crate::error::Result;
use crate::keys::CollectionKind;
use crate::storage::Storage;
use serde::Serialize;

/// Which collections a seeding pass actually wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedReport {
    pub seeded: Vec<CollectionKind>,
    pub skipped: Vec<CollectionKind>,
}

impl SeedReport {
    /// Nothing was written.
    pub fn is_noop(&self) -> bool {
        self.seeded.is_empty()
    }
}

/// Seed every collection that has no value yet.
pub fn seed_mock_data<S: Storage>(store: &mut CollectionStore<S>) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for kind in CollectionKind::ALL {
        let key = kind.storage_key();
        let seeded = match kind {
            CollectionKind::Drivers => store.init_collection(key, &seed_drivers())?,
            CollectionKind::Trucks => store.init_collection(key, &seed_trucks())?,
            CollectionKind::Orders => store.init_collection(key, &seed_orders())?,
            CollectionKind::Parts => store.init_collection(key, &seed_parts())?,
            CollectionKind::Employees => store.init_collection(key, &seed_employees())?,
            CollectionKind::Suppliers => store.init_collection(key, &seed_suppliers())?,
            CollectionKind::Trips
            | CollectionKind::ServiceRecords
            | CollectionKind::FuelRecords
            | CollectionKind::Invoices
            | CollectionKind::LeaveRequests
            | CollectionKind::Bonuses => store.init_collection::<()>(key, &[])?,
        };

        if seeded {
            report.seeded.push(kind);
        } else {
            report.skipped.push(kind);
        }
    }

    tracing::info!(
        seeded = report.seeded.len(),
        skipped = report.skipped.len(),
        "seed pass complete"
    );
    Ok(report)
}

pub fn seed_drivers() -> Vec<Driver> {
    let driver = |id: &str, name: &str, phone: &str, license_expiry: &str, status| Driver {
        id: id.into(),
        name: name.into(),
        phone: phone.into(),
        license_expiry: license_expiry.into(),
        status,
    };

    vec![
        driver("d1", "Gheorghe Marin", "0721000001", "2027-03-15", DriverStatus::Available),
        driver("d2", "Vasile Popa", "0721000002", "2026-11-20", DriverStatus::Available),
        driver("d3", "Andrei Stoica", "0721000003", "2026-06-10", DriverStatus::OnTrip),
    ]
}

pub fn seed_trucks() -> Vec<Truck> {
    vec![
        Truck {
            id: "t1".into(),
            plate_number: "CT-01-TML".into(),
            brand: "Volvo".into(),
            model: "FH16".into(),
            year: 2021,
            mileage: 320_000,
            status: TruckStatus::Available,
            itp_expiry: "2026-09-01".into(),
            rca_expiry: "2026-12-01".into(),
            vignette_expiry: "2026-06-30".into(),
        },
        Truck {
            id: "t2".into(),
            plate_number: "CT-02-TML".into(),
            brand: "MAN".into(),
            model: "TGX".into(),
            year: 2020,
            mileage: 410_000,
            status: TruckStatus::OnTrip,
            itp_expiry: "2026-07-15".into(),
            rca_expiry: "2027-01-15".into(),
            vignette_expiry: "2026-08-31".into(),
        },
        Truck {
            id: "t3".into(),
            plate_number: "CT-03-TML".into(),
            brand: "Mercedes".into(),
            model: "Actros".into(),
            year: 2022,
            mileage: 180_000,
            status: TruckStatus::InService,
            itp_expiry: "2027-02-28".into(),
            rca_expiry: "2027-03-01".into(),
            vignette_expiry: "2026-12-31".into(),
        },
    ]
}

/// Thirty orders, enough to exercise pagination at every page size.
pub fn seed_orders() -> Vec<Order> {
    use OrderStatus::*;

    let rows: [(&str, &str, &str, &str, &str, OrderStatus, f64); 30] = [
        ("o1", "SC Logistica SRL", "Constanța", "București", "2026-02-20", Delivered, 18.0),
        ("o2", "Trans Europa SA", "Timișoara", "Constanța", "2026-02-21", InTransit, 22.0),
        ("o3", "Cargo Plus SRL", "Cluj-Napoca", "Brăila", "2026-02-22", Pending, 15.0),
        ("o4", "Danube Freight SRL", "Galați", "Iași", "2026-02-23", Assigned, 12.0),
        ("o5", "BlueRoad Logistics", "Brașov", "Sibiu", "2026-02-24", Pending, 9.0),
        ("o6", "Carpathia Transport", "Sibiu", "Brașov", "2026-02-25", InTransit, 14.0),
        ("o7", "Atlas Cargo SA", "București", "Ploiești", "2026-02-26", Delivered, 7.0),
        ("o8", "PortLine SRL", "Constanța", "Craiova", "2026-02-27", Assigned, 20.0),
        ("o9", "EuroHaul SRL", "Craiova", "Timișoara", "2026-02-28", InTransit, 16.0),
        ("o10", "Nordic Routes", "Oradea", "Cluj-Napoca", "2026-03-01", Pending, 10.0),
        ("o11", "FastTrack SRL", "Arad", "Deva", "2026-03-02", Delivered, 6.0),
        ("o12", "Balkan Cargo SA", "Deva", "București", "2026-03-03", Cancelled, 11.0),
        ("o13", "TransMarin Partners", "Pitești", "Constanța", "2026-03-04", Assigned, 13.0),
        ("o14", "GreenWay Logistics", "Buzău", "Galați", "2026-03-05", Pending, 8.0),
        ("o15", "Delta Freight", "Tulcea", "Constanța", "2026-03-06", InTransit, 17.0),
        ("o16", "SteelMove SRL", "Hunedoara", "Târgu Mureș", "2026-03-07", Assigned, 24.0),
        ("o17", "CityLink Transport", "Târgu Mureș", "Cluj-Napoca", "2026-03-08", Delivered, 5.0),
        ("o18", "OceanBridge SRL", "Constanța", "București", "2026-03-09", InTransit, 19.0),
        ("o19", "Rapid Haulage", "București", "Brașov", "2026-03-10", Pending, 9.0),
        ("o20", "WestLine Cargo", "Timișoara", "Oradea", "2026-03-11", Assigned, 15.0),
        ("o21", "Central Freight", "Cluj-Napoca", "Satu Mare", "2026-03-12", Delivered, 12.0),
        ("o22", "IronRoute SA", "Reșița", "Arad", "2026-03-13", Cancelled, 10.0),
        ("o23", "Skyline Logistics", "Iași", "Bacău", "2026-03-14", Pending, 7.0),
        ("o24", "RoadRunner SRL", "Bacău", "Botoșani", "2026-03-15", InTransit, 11.0),
        ("o25", "CargoHub SRL", "Botoșani", "Suceava", "2026-03-16", Assigned, 14.0),
        ("o26", "TransValea", "Suceava", "Iași", "2026-03-17", Delivered, 6.0),
        ("o27", "HarborLine", "Constanța", "Galați", "2026-03-18", Pending, 21.0),
        ("o28", "Mountain Freight", "Brașov", "București", "2026-03-19", InTransit, 13.0),
        ("o29", "EastWest Cargo", "București", "Iași", "2026-03-20", Assigned, 16.0),
        ("o30", "Danube Express", "Galați", "Brăila", "2026-03-21", Delivered, 4.0),
    ];

    rows.into_iter()
        .map(|(id, client, origin, destination, date, status, weight)| Order {
            id: id.into(),
            client_name: client.into(),
            origin: origin.into(),
            destination: destination.into(),
            date: date.into(),
            status,
            weight: Some(weight),
            notes: None,
        })
        .collect()
}

pub fn seed_parts() -> Vec<Part> {
    let part = |id: &str, name: &str, category: &str, quantity, unit_price, supplier: &str, min_stock| Part {
        id: id.into(),
        name: name.into(),
        category: category.into(),
        quantity,
        unit_price,
        supplier: supplier.into(),
        min_stock,
    };

    vec![
        part("p1", "Filtru ulei", "Filtre", 25, 45.0, "Auto Parts SRL", 10),
        part("p2", "Plăcuțe frână", "Frâne", 8, 320.0, "Brake Systems SA", 4),
        part("p3", "Curea distribuție", "Motor", 3, 580.0, "Auto Parts SRL", 2),
    ]
}

pub fn seed_employees() -> Vec<Employee> {
    let employee = |id: &str,
                    name: &str,
                    position: &str,
                    department: &str,
                    phone: &str,
                    email: &str,
                    hire_date: &str,
                    salary| Employee {
        id: id.into(),
        name: name.into(),
        position: position.into(),
        department: department.into(),
        phone: phone.into(),
        email: email.into(),
        hire_date: hire_date.into(),
        salary,
        documents: Vec::new(),
    };

    vec![
        employee(
            "e1",
            "Gheorghe Marin",
            "Șofer",
            "Transport",
            "0721000001",
            "gheorghe@transmarin.ro",
            "2019-03-01",
            5500.0,
        ),
        employee(
            "e2",
            "Vasile Popa",
            "Șofer",
            "Transport",
            "0721000002",
            "vasile@transmarin.ro",
            "2020-07-15",
            5200.0,
        ),
        employee(
            "e3",
            "Ana Radu",
            "Dispecer",
            "Operațiuni",
            "0722000001",
            "ana@transmarin.ro",
            "2021-01-10",
            4800.0,
        ),
    ]
}

pub fn seed_suppliers() -> Vec<Supplier> {
    vec![
        Supplier {
            id: "s1".into(),
            name: "Auto Parts SRL".into(),
            cui: "RO12345678".into(),
            address: "Str. Industriilor 10, Constanța".into(),
            phone: "0241500100".into(),
            email: "contact@autoparts.ro".into(),
            bank_account: "RO49AAAA1B31007593840000".into(),
        },
        Supplier {
            id: "s2".into(),
            name: "Brake Systems SA".into(),
            cui: "RO87654321".into(),
            address: "Bd. Muncii 25, București".into(),
            phone: "0212000200".into(),
            email: "office@brakesystems.ro".into(),
            bank_account: "RO49BBBB1B31007593840000".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn seeds_empty_store() {
        let mut store = CollectionStore::new(MemoryStorage::new());
        let report = seed_mock_data(&mut store).unwrap();

        assert_eq!(report.seeded.len(), CollectionKind::ALL.len());
        assert!(report.skipped.is_empty());

        let orders: Vec<Order> = store.get_collection(CollectionKind::Orders.storage_key());
        assert_eq!(orders.len(), 30);
        assert_eq!(orders[0].id, "o1");
        assert_eq!(orders[29].client_name, "Danube Express");

        let trips: Vec<serde_json::Value> = store.get_collection(CollectionKind::Trips.storage_key());
        assert!(trips.is_empty());
        assert!(store.contains_key(CollectionKind::Trips.storage_key()));
    }

    #[test]
    fn second_pass_is_noop() {
        let mut store = CollectionStore::new(MemoryStorage::new());
        seed_mock_data(&mut store).unwrap();

        let key = CollectionKind::Drivers.storage_key();
        store
            .remove_item(key, |d: &Driver| d.id == "d1")
            .unwrap();

        let report = seed_mock_data(&mut store).unwrap();
        assert!(report.is_noop());

        let drivers: Vec<Driver> = store.get_collection(key);
        assert_eq!(drivers.len(), 2);
    }

    #[test]
    fn seed_ids_unique() {
        let orders = seed_orders();
        let mut ids: Vec<_> = orders.iter().map(|o| o.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), orders.len());
    }

    #[test]
    fn seed_surfaces_write_failure() {
        let mut store = CollectionStore::new(MemoryStorage::with_quota(64));
        assert!(seed_mock_data(&mut store).is_err());
    }
}
